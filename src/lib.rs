//! # Nodeform - Workflow-Bound Form Builder Core
//!
//! **Nodeform** is the state and validation core of a visual form builder. A user
//! assembles an input form from typed components (text fields, dropdowns, sliders,
//! toggles, checkboxes, image uploads) and binds each one to an input parameter of
//! an imported workflow: a JSON graph of nodes with typed inputs, as exported by
//! ComfyUI in API format.
//!
//! ## Core Workflow
//!
//! 1.  **Import a Workflow**: Hand the raw text of a workflow file to
//!     [`workflow::parse_and_validate`] (or [`AppState::import_workflow`](app::AppState::import_workflow)).
//!     Invalid files are rejected as a whole; the previous workflow stays in place.
//! 2.  **Build the Form**: Use [`FormBuilder`](builder::FormBuilder) to add, edit, reorder,
//!     select and remove components. Every component kind is defined once in the
//!     [`component`] registry, including its default props and property editors.
//! 3.  **Bind Inputs**: Offer [`workflow::list_bindable_inputs`] for the chosen node. Inputs
//!     that are edges to other nodes are classified at parse time and never offered.
//! 4.  **Preview and Export**: Render the form with [`FormPreview`](preview::FormPreview)
//!     and write the workflow back out with [`workflow::export_workflow`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nodeform::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = std::fs::read_to_string("workflow.json")?;
//!
//!     // State is owned here and passed down explicitly.
//!     let mut app = AppState::new();
//!     let document = app.import_workflow(&raw)?.clone();
//!
//!     let mut builder = FormBuilder::new();
//!     let seed = builder.add_component("slider")?;
//!     builder.update_component(seed, &ComponentUpdate::new().label("Seed"))?;
//!     builder.bind_node(seed, Some("3".to_string()))?;
//!
//!     if let Some(node) = document.get("3") {
//!         println!("Bindable inputs: {:?}", list_bindable_inputs(node));
//!     }
//!     builder.bind_input(seed, Some("seed".to_string()))?;
//!
//!     println!("{}", FormPreview::new().render_text(builder.components()));
//!     println!("{}", export_workflow(&document)?);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod builder;
pub mod component;
pub mod config;
pub mod error;
pub mod forms;
pub mod prelude;
pub mod preview;
pub mod route;
pub mod session;
pub mod workflow;
