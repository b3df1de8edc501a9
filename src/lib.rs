//! # uanpps-node
//!
//! Munin multigraph plugins for the public telemetry of Ukrainian nuclear
//! power plants.
//!
//! One binary serves every plant. Munin runs it through symlinks named after
//! the plant (`khnpp_node`, `rnpp_node`, `sunpp_node`, `znpp_node`), or the
//! plant is given with `--plant`.
//!
//! ```text
//!            ┌──────────┐   readings   ┌──────────────┐   lines   ┌────────┐
//!  site ────▶│ adapter  │─────────────▶│ uanpps-munin │──────────▶│ stdout │
//!            └──────────┘              └──────▲───────┘           └────────┘
//!                                             │ descriptors, palette
//!                                        ┌────┴────┐
//!                                        │ catalog │
//!                                        └─────────┘
//! ```
//!
//! - **[`catalog`]**: graph descriptors and colour palette, embedded or from disk
//! - **[`settings`]**: timeout, proxy, user agent and site overrides
//! - **[`plugin`]**: `config` and fetch modes
//!
//! ## Usage
//!
//! ```bash
//! # Graph metadata
//! khnpp_node config
//!
//! # Current values
//! uanpps-node --plant rnpp
//! ```

pub mod catalog;
pub mod plugin;
pub mod settings;

pub use catalog::Catalog;
pub use settings::Settings;
