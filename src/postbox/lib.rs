//! # Postbox Architecture
//!
//! Postbox is a **UI-agnostic client library** for a remote post-storage
//! service, with a thin interactive CLI on top. The library owns everything
//! from command interpretation to view-state management; the binary only
//! wires stdin/stdout to it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Reads command lines, picks the service URL, exits        │
//! │  - The ONLY place that knows about stdin/exit codes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Controller (controller.rs)                            │
//! │  - Executes interpreted commands against the service        │
//! │  - Owns ViewState and the Idle/Loading/Rendered/Error phase │
//! │  - Writes every render wholesale through a Surface          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Interpreter + Form (command.rs, form.rs)                   │
//! │  - Pure parsing of command lines, never fails               │
//! │  - Composition-form field collection and tag parsing        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Remote Boundary (service/)                                 │
//! │  - Abstract RemoteService trait                             │
//! │  - HttpService (production), InMemoryService (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `controller.rs` inward, code renders through the [`surface::Surface`]
//! trait and returns regular Rust types. Nothing in the library writes to
//! stdout directly or assumes a terminal, so the same core could back a TUI
//! or a web page.
//!
//! ## Module Overview
//!
//! - [`command`]: the command interpreter (pure parsing)
//! - [`controller`]: the view controller and its state machine
//! - [`form`]: the post-composition form lifecycle
//! - [`service`]: the remote service boundary and implementations
//! - [`render`]: post/list formatting, timestamp conversion
//! - [`surface`]: the render-target abstraction
//! - [`price`]: the separable price-feed plugin command
//! - [`model`]: core data types (`Post`, `ViewState`)
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod price;
pub mod render;
pub mod service;
pub mod surface;
