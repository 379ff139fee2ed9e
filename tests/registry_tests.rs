use voicebank::registry::{CommandKind, CommandRegistry, RegistryError, ValueKind};

#[test]
fn test_builtin_aliases_resolve() {
    let registry = CommandRegistry::builtin();

    assert_eq!(registry.resolve_alias("انتقال"), Ok(CommandKind::Transfer));
    assert_eq!(registry.resolve_alias("شارژ"), Ok(CommandKind::MobileCharge));
    assert_eq!(registry.resolve_alias("چک"), Ok(CommandKind::CheckNumberValidation));
    assert_eq!(registry.resolve_alias("موجودی"), Ok(CommandKind::RemainderCheck));
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_alias_tolerates_whitespace_and_punctuation() {
    let registry = CommandRegistry::builtin();

    assert_eq!(registry.resolve_alias("  انتقال.\n"), Ok(CommandKind::Transfer));
    assert_eq!(registry.resolve_alias("موجودی؟"), Ok(CommandKind::RemainderCheck));
}

#[test]
fn test_unknown_token_is_rejected() {
    let registry = CommandRegistry::builtin();

    assert_eq!(
        registry.resolve_alias("xyz"),
        Err(RegistryError::UnrecognizedCommand("xyz".to_string()))
    );
    assert!(registry.resolve_alias("").is_err());
    // Command identifiers are not aliases unless configured
    assert!(registry.resolve_alias("transfer").is_err());
}

#[test]
fn test_every_command_has_ordered_slots() {
    let registry = CommandRegistry::builtin();

    for kind in CommandKind::ALL {
        let slots = registry.slots_for(kind);
        assert!(!slots.is_empty(), "{kind} has no slots");

        let mut names: Vec<_> = slots.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), slots.len(), "{kind} repeats a slot name");
    }

    let transfer: Vec<_> = registry.slots_for(CommandKind::Transfer).iter().map(|s| s.label).collect();
    assert_eq!(transfer, ["Source Account", "Destination Account", "Amount"]);

    let charge = registry.slots_for(CommandKind::MobileCharge);
    assert_eq!(charge[0].value_kind, ValueKind::Text);
    assert_eq!(charge[1].value_kind, ValueKind::Number);
}

#[test]
fn test_extra_aliases_extend_and_override() {
    let registry = CommandRegistry::with_aliases([
        ("Transfer", CommandKind::Transfer),
        ("چک", CommandKind::RemainderCheck),
        ("   ", CommandKind::MobileCharge),
    ]);

    assert_eq!(registry.resolve_alias("transfer"), Ok(CommandKind::Transfer));
    assert_eq!(registry.resolve_alias("TRANSFER!"), Ok(CommandKind::Transfer));
    assert_eq!(registry.resolve_alias("چک"), Ok(CommandKind::RemainderCheck));
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_command_identifiers_round_trip_through_serde() {
    let json = serde_json::to_string(&CommandKind::CheckNumberValidation).unwrap();
    assert_eq!(json, "\"checkNumberValidation\"");
    assert_eq!(CommandKind::MobileCharge.as_str(), "mobileCharge");
}

#[test]
fn test_arabic_letter_forms_resolve() {
    let registry = CommandRegistry::builtin();

    // Arabic kaf (U+0643) and yeh (U+064A)
    assert_eq!(registry.resolve_alias("چك"), Ok(CommandKind::CheckNumberValidation));
    assert_eq!(registry.resolve_alias("موجودي"), Ok(CommandKind::RemainderCheck));
    assert_eq!(registry.resolve_alias("موجودى"), Ok(CommandKind::RemainderCheck));
}
