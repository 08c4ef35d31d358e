//! Layout editor core for the browser board.
//!
//! Compiled to WebAssembly, this crate owns everything about the page
//! except drawing: the element collection, selection, pointer gestures,
//! z-ordering, persistence and export. The host page forwards DOM events to
//! [`engine::Engine`] and redraws from its JSON projection whenever a command
//! reports a change. The same [`engine::EngineCore`] runs natively for tests
//! and the `layoutboard` command line.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Element model, style records and the document store |
//! | [`geometry`] | Pure translate / resize / rotate math |
//! | [`zorder`] | Layer swaps and z-index compaction |
//! | [`input`] | Tools, keys and the gesture state machine |
//! | [`hit`] | Hit-testing bodies and selection handles |
//! | [`props`] | Property panel input parsing |
//! | [`render`] | Render projection and layers panel feed |
//! | [`persist`] | Saved-state record and storage backends |
//! | [`export`] | `layout.json` and static `layout.html` export |
//! | [`consts`] | Canvas dimensions and default sizes |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod persist;
pub mod props;
pub mod render;
pub mod zorder;
