mod authorization_record;

pub use authorization_record::{AuthorizationRecord, AuthorizationStatus};
