//! # appspec-populate
//!
//! Turns shorthand containers into native container definitions.
//!
//! Handles:
//! - **Probes**: expanding the unified `health` probe into liveness and readiness.
//! - **EnvFrom**: expanding bulk `envFrom` imports into individual key references.
//! - **Containers**: applying both stages to a whole batch, all or nothing.
//!
//! Every function here is pure. Nothing is logged, cached, or written.
//!
//! # Example
//!
//! ```rust
//! use appspec_common::types::{ConfigMap, EnvFromSource, ShorthandContainer};
//!
//! let mut settings = ConfigMap { name: "settings".into(), ..ConfigMap::default() };
//! let _ = settings.data.insert("LOG_LEVEL".into(), "debug".into());
//!
//! let mut web = ShorthandContainer::default();
//! web.container.name = "web".into();
//! web.env_from.push(EnvFromSource::config_map("settings"));
//!
//! let native = appspec_populate::populate(&[web], &[settings], &[]).expect("populate");
//! assert_eq!(native[0].env[0].name, "LOG_LEVEL");
//! ```

pub mod containers;
pub mod env_from;
pub mod error;
pub mod probes;

pub use containers::populate;
pub use error::{EnvFromError, PopulationError, ProbeError, Stage};
