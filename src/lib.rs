//! Studyboard - layout and learning-activity engine for the 4976 student dashboard
//!
//! Studyboard holds the platform-independent logic behind the dashboard: it
//! classifies the viewport into a device class, decides between the sidebar
//! and bottom-tab compositions, and turns daily learning activity into a
//! calendar heat map: samples → week buckets → intensity levels → report.
//!
//! ## Modules
//!
//! - **Responsive**: breakpoints, layout flags, grid columns, scaled spacing
//! - **Activity**: week bucketing, intensity levels, summary statistics
//! - **Heatmap**: render-ready report with legend and chart geometry
//! - **Navigation / Session**: routes, chrome selection and the mock sign-in

pub mod activity;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod navigation;
pub mod pipeline;
pub mod responsive;
pub mod session;
pub mod synthetic;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::BoardConfig;
pub use error::BoardError;
pub use heatmap::{build_heatmap, HeatmapOptions, HeatmapReport};
pub use navigation::{NavigationChrome, Navigator, Route, ScreenPlan, UserRole};
pub use pipeline::{
    activity_summary_json, activity_to_heatmap_json, viewport_to_layout_json, BoardProcessor,
    LayoutReport,
};
pub use responsive::{classify_width, grid_columns, pick_variant, resolve_layout, ResponsivePolicy};
pub use session::{Credentials, LoginService, Session};
pub use synthetic::{generate_activity, SyntheticConfig};
pub use types::{
    ActivitySample, ActivitySummary, DayCell, DeviceClass, LayoutDecision, Platform, Viewport,
    WeekBucket,
};

/// Library version
pub const STUDYBOARD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "studyboard";
