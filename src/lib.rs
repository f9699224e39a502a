//! Taskboard: headless core of a personal Kanban task board.
//!
//! This crate keeps a three-column task board in sync with an agency
//! backend. It moves tasks between columns optimistically and reconciles
//! with the backend, runs live deadline countdowns and manages comment
//! threads with staged attachments.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend and the view
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task model, partitions, Task API port and status transitions
//! - [`deadline`]: Countdown projection and per-task timers
//! - [`attachment`]: Staging area and attachment classification
//! - [`comment`]: Comment threads and submission
//! - [`board`]: Board context, notifications and the board controller
//! - [`remote`]: Backend failure taxonomy and the HTTP adapter
//! - [`config`]: Runtime configuration

pub mod attachment;
pub mod board;
pub mod clock;
pub mod comment;
pub mod config;
pub mod deadline;
pub mod remote;
pub mod task;
