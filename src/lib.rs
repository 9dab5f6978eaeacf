pub mod bundles;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod output;
pub mod parse;
pub mod registry;

pub use config::{FormatterKind, RunConfig, Target};
pub use descriptor::{Action, OptionDescriptor, FLAG_PREFIX};
pub use error::{ParseError, RegistrationError};
pub use hooks::{HookRegistry, LifecycleHook, VerboseHook};
pub use registry::Registry;
