use super::*;
use chrono::NaiveDate;

#[stub]
pub trait Branch {
    fn code(&self) -> String;
}

#[stub]
pub trait Account {
    fn owner(&self) -> String;
    fn balance(&self) -> i64;
    fn opened(&self) -> NaiveDate;
    fn branch(&self) -> BranchStub;
    fn tags(&self) -> Vec<Weekday>;

    fn summary(&self) -> String {
        format!("{} ({})", self.owner(), self.balance())
    }
}

#[test]
fn test_accessors_are_stable() {
    let account: AccountStub = seeded(70).stub();
    assert_eq!(account.owner(), account.owner());
    assert_eq!(account.balance(), account.balance());
    assert_eq!(account.opened(), account.opened());
    assert_eq!(account.tags(), account.tags());
    assert_eq!(account.branch().code(), account.branch().code());
    assert_eq!(
        account.summary(),
        format!("{} ({})", account.owner(), account.balance())
    );
}

#[test]
fn test_display_names_interface() {
    let account: AccountStub = Populator::new().stub();
    assert_eq!(account.to_string(), "random stub for engine::stubs::Account");
    assert_eq!(
        account.branch().to_string(),
        "random stub for engine::stubs::Branch"
    );
}

#[test]
fn test_top_level_interface_request_builds_stub() {
    let populator = Populator::new();
    let value = populator.create(&AccountStub::type_desc()).unwrap();
    assert_eq!(value.kind(), "interface stub");
    let account = AccountStub::from_value(value).unwrap();
    let _ = account.owner();
}

#[test]
fn test_nested_interface_is_unresolved() {
    let populator = Populator::new();
    let err = populator
        .new_instance::<Vec<AccountStub>>()
        .unwrap_err();
    assert!(matches!(err, PopulateError::Unresolved { .. }));
}

#[test]
fn test_stubs_share_values_by_default() {
    let populator = seeded(71);
    let first: AccountStub = populator.stub();
    let second: AccountStub = populator.stub();
    assert_ne!(first, second);
    assert_eq!(first.owner(), second.owner());
}

#[test]
fn test_per_instance_scope() {
    let populator =
        Populator::with_config(Config::default().with_stub_scope(StubScope::PerInstance));
    populator.reseed(72);
    let first: AccountStub = populator.stub();
    let second: AccountStub = populator.stub();
    assert_eq!(first.balance(), first.balance());
    assert_eq!(second.balance(), second.balance());
    assert_ne!(first.balance(), second.balance());
}
