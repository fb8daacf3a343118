pub mod traits;

pub use traits::{CommandRunner, ConfirmationSource, RealCommandRunner, StdinConfirmation};
