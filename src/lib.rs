//! Typed authoring of CI workflow files.
//!
//! Build `${{ }}` expressions from context accessors and function helpers,
//! assemble a [`Workflow`], and serialise it to canonical YAML.
//!
//! ```
//! use ghaflow::{context::github, expr, fns, render, Job, Step, Workflow};
//!
//! let on_main = expr!("{} == {}", github::ref_(), "refs/heads/main").unwrap();
//! let workflow = Workflow::new("CI", "push").with_job(
//!     "test",
//!     Job::runner("ubuntu-latest")
//!         .with_step(Step::run("cargo test"))
//!         .with_step(
//!             Step::run("./deploy.sh")
//!                 .with_condition(on_main)
//!                 .with_env("SHA", fns::format("sha-{0}", [github::sha()]).unwrap().wrap().unwrap()),
//!         ),
//! );
//! let text = render::stringify(&workflow).unwrap();
//! assert!(text.contains("if: ${{ github.ref == 'refs/heads/main' }}"));
//! ```

pub mod cli;
pub mod core;
pub mod logging;
pub mod utils;

pub use crate::core::context;
pub use crate::core::error::{FlowError, FlowResult};
pub use crate::core::expression::functions as fns;
pub use crate::core::expression::template::{expr, ExprValue};
pub use crate::core::expression::{raw, token, unwrap, wrap, Fragment, WorkflowExpr};
pub use crate::core::render;
pub use crate::core::workflow::{Job, Step, Workflow};
pub use crate::utils::lines;

/// Current crate version string exposed for CLI and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, anyhow::Error>;
