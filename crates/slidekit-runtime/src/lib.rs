#![forbid(unsafe_code)]

//! slidekit runtime
//!
//! This crate ties the slide registry, the scroll-position observer, the
//! navigation controller, and the autoplay scheduler into a single
//! [`Carousel`] engine that a host drives with events and ticks.
//!
//! # Key Components
//!
//! - [`Carousel`] - the engine, with explicit `start`/`stop` lifecycle
//! - [`CarouselConfig`] - options and timing windows
//! - [`host`] - traits for the scroll surface, visibility oracle, and event sink
//! - [`ScrollObserver`] - debounced batching of visibility reports
//! - [`NavigationController`] - owner of the active index and clone reconciliation
//! - [`AutoplayScheduler`] - interaction-aware repeating advance
//! - [`simulator::HostSimulator`] - deterministic in-memory host for tests
//!
//! # Data flow
//!
//! A command or timer asks the controller for a seek; the host scrolls; the
//! oracle reports which entry settled in view; the observer batches those
//! reports until scrolling goes quiet; the controller reconciles (correcting
//! off clones) and publishes `slide-change` when the logical index moves.

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod host;
pub mod observer;
pub mod simulator;

pub use autoplay::AutoplayScheduler;
pub use carousel::{Carousel, CarouselSnapshot, CarouselStats, CarouselView, Lifecycle};
pub use config::CarouselConfig;
pub use controller::{
    ActiveChange, NavOutcome, NavState, NavigationController, ReconcilePhase, Seek, Step,
};
pub use host::{
    CarouselHost, EventSink, Notification, ScrollRequest, ScrollSurface, VisibilityOracle,
};
pub use observer::{BatchOutcome, ScrollObserver};
