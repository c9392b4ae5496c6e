//! Responsive layout policy
//!
//! Maps a viewport width and host platform to a device class and the layout
//! flags the host needs to choose between the sidebar composition and the
//! bottom-tab composition. Every function here is pure: the host passes the
//! current viewport in on each render pass or resize callback.
//!
//! Out-of-range input never fails. Non-positive or non-finite widths classify
//! as mobile and grids fall back to a single column.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{DeviceClass, LayoutDecision, Platform, Viewport};

/// Width at which the tablet class starts
pub const TABLET_MIN_WIDTH: f64 = 768.0;

/// Width at which the desktop class starts
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

/// Default minimum item width for grid column computation
pub const DEFAULT_ITEM_MIN_WIDTH: f64 = 300.0;

/// Upper bound of the navigation sidebar width
pub const SIDEBAR_MAX_WIDTH: f64 = 300.0;

/// Fraction of the viewport the sidebar may take
pub const SIDEBAR_WIDTH_RATIO: f64 = 0.25;

/// Ordered width thresholds between device classes
///
/// `mobile` is the first width that is no longer mobile, `tablet` the first
/// width that is no longer tablet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub mobile: f64,
    pub tablet: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: TABLET_MIN_WIDTH,
            tablet: DESKTOP_MIN_WIDTH,
        }
    }
}

impl Breakpoints {
    /// Thresholds must be positive and strictly increasing.
    pub fn is_ordered(&self) -> bool {
        self.mobile.is_finite()
            && self.tablet.is_finite()
            && self.mobile > 0.0
            && self.mobile < self.tablet
    }

    /// Classify a width. A width exactly on a threshold belongs to the
    /// higher class.
    pub fn classify(&self, width: f64) -> DeviceClass {
        if width.is_nan() || width < self.mobile {
            DeviceClass::Mobile
        } else if width < self.tablet {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Resolver bound to a set of breakpoints and a default grid item width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsivePolicy {
    breakpoints: Breakpoints,
    item_min_width: f64,
}

impl Default for ResponsivePolicy {
    fn default() -> Self {
        Self::new(Breakpoints::default(), DEFAULT_ITEM_MIN_WIDTH)
    }
}

impl ResponsivePolicy {
    pub fn new(breakpoints: Breakpoints, item_min_width: f64) -> Self {
        Self {
            breakpoints,
            item_min_width,
        }
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn classify_width(&self, width: f64) -> DeviceClass {
        self.breakpoints.classify(width)
    }

    /// Desktop layout is only used for desktop-class widths on the web.
    /// A native app on a wide screen keeps the tab bar.
    pub fn is_desktop_like(&self, width: f64, platform: Platform) -> bool {
        self.classify_width(width) == DeviceClass::Desktop && platform == Platform::Web
    }

    pub fn resolve_layout(&self, width: f64, platform: Platform) -> LayoutDecision {
        let device_class = self.classify_width(width);
        let desktop_like = self.is_desktop_like(width, platform);

        let decision = LayoutDecision {
            device_class,
            width,
            use_sidebar: desktop_like,
            use_bottom_nav: !desktop_like,
            use_desktop_composition: desktop_like,
            columns: grid_columns(width, self.item_min_width),
        };

        debug!(
            width,
            platform = platform.as_str(),
            device_class = device_class.as_str(),
            desktop_like,
            "resolved layout"
        );

        decision
    }

    pub fn resolve_viewport(&self, viewport: &Viewport) -> LayoutDecision {
        self.resolve_layout(viewport.width, viewport.platform)
    }
}

/// Classify a width with the default breakpoints.
///
/// `< 768` is mobile, `768..1024` is tablet, anything wider is desktop.
pub fn classify_width(width: f64) -> DeviceClass {
    Breakpoints::default().classify(width)
}

/// Resolve layout flags with the default breakpoints and item width.
pub fn resolve_layout(width: f64, platform: Platform) -> LayoutDecision {
    ResponsivePolicy::default().resolve_layout(width, platform)
}

/// Number of grid columns that fit `width`, never less than one.
///
/// A non-positive `item_min_width` is a caller error; it is clamped to 1
/// instead of dividing by zero.
pub fn grid_columns(width: f64, item_min_width: f64) -> u32 {
    let item_min_width = if item_min_width.is_finite() && item_min_width > 0.0 {
        item_min_width
    } else {
        warn!(item_min_width, "non-positive grid item width, clamping to 1");
        1.0
    };

    if !width.is_finite() || width <= 0.0 {
        return 1;
    }

    let fitted = (width / item_min_width).floor();
    if fitted >= u32::MAX as f64 {
        u32::MAX
    } else {
        (fitted as u32).max(1)
    }
}

/// Pick between a desktop and a standard variant.
///
/// Only selects; whatever the caller passes is returned untouched, so the
/// resolver never constructs a view.
pub fn pick_variant<T>(desktop_like: bool, desktop: T, standard: T) -> T {
    if desktop_like {
        desktop
    } else {
        standard
    }
}

/// Width of the navigation sidebar for a viewport width
pub fn sidebar_width(width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 {
        return 0.0;
    }
    (width * SIDEBAR_WIDTH_RATIO).min(SIDEBAR_MAX_WIDTH)
}

impl LayoutDecision {
    /// Grid columns for a different minimum item width.
    pub fn columns_for(&self, item_min_width: f64) -> u32 {
        grid_columns(self.width, item_min_width)
    }

    pub fn is_desktop_like(&self) -> bool {
        self.use_desktop_composition
    }

    /// Choose the variant matching this decision.
    pub fn pick<T>(&self, desktop: T, standard: T) -> T {
        pick_variant(self.use_desktop_composition, desktop, standard)
    }
}

/// Device facts derived from a viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub width: f64,
    pub height: f64,
    pub device_class: DeviceClass,
    pub is_web: bool,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    /// Tablet or desktop
    pub is_large_screen: bool,
}

impl DeviceInfo {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self::with_breakpoints(viewport, &Breakpoints::default())
    }

    pub fn with_breakpoints(viewport: &Viewport, breakpoints: &Breakpoints) -> Self {
        let device_class = breakpoints.classify(viewport.width);
        let is_tablet = device_class == DeviceClass::Tablet;
        let is_desktop = device_class == DeviceClass::Desktop;

        Self {
            width: viewport.width,
            height: viewport.height,
            device_class,
            is_web: viewport.platform == Platform::Web,
            is_mobile: device_class == DeviceClass::Mobile,
            is_tablet,
            is_desktop,
            is_large_screen: is_tablet || is_desktop,
        }
    }
}

/// Per-device-class values with fallback to the mobile value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveValue<T> {
    pub mobile: T,
    #[serde(default)]
    pub tablet: Option<T>,
    #[serde(default)]
    pub desktop: Option<T>,
}

impl<T: Clone> ResponsiveValue<T> {
    pub fn new(mobile: T) -> Self {
        Self {
            mobile,
            tablet: None,
            desktop: None,
        }
    }

    pub fn tablet(mut self, value: T) -> Self {
        self.tablet = Some(value);
        self
    }

    pub fn desktop(mut self, value: T) -> Self {
        self.desktop = Some(value);
        self
    }

    pub fn resolve(&self, device_class: DeviceClass) -> T {
        let value = match device_class {
            DeviceClass::Mobile => None,
            DeviceClass::Tablet => self.tablet.as_ref(),
            DeviceClass::Desktop => self.desktop.as_ref(),
        };
        value.unwrap_or(&self.mobile).clone()
    }
}

/// Build a scaled value: explicit overrides win, otherwise the mobile value
/// is multiplied by the per-class factor.
fn scaled(
    mobile: f64,
    tablet: Option<f64>,
    desktop: Option<f64>,
    tablet_factor: f64,
    desktop_factor: f64,
) -> ResponsiveValue<f64> {
    ResponsiveValue {
        mobile,
        tablet: Some(tablet.unwrap_or(mobile * tablet_factor)),
        desktop: Some(desktop.unwrap_or(mobile * desktop_factor)),
    }
}

/// Padding scaled x1.5 on tablet and x2 on desktop unless overridden
pub fn padding(mobile: f64, tablet: Option<f64>, desktop: Option<f64>) -> ResponsiveValue<f64> {
    scaled(mobile, tablet, desktop, 1.5, 2.0)
}

/// Margin, same scaling as padding
pub fn margin(mobile: f64, tablet: Option<f64>, desktop: Option<f64>) -> ResponsiveValue<f64> {
    scaled(mobile, tablet, desktop, 1.5, 2.0)
}

/// Font size scaled x1.1 on tablet and x1.2 on desktop unless overridden
pub fn font_size(mobile: f64, tablet: Option<f64>, desktop: Option<f64>) -> ResponsiveValue<f64> {
    scaled(mobile, tablet, desktop, 1.1, 1.2)
}

/// Maximum content width, only applied on desktop
pub fn max_width(device_class: DeviceClass, desktop: f64) -> Option<f64> {
    (device_class == DeviceClass::Desktop).then_some(desktop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_width_bands() {
        for w in [0.0, 1.0, 375.0, 767.0, 767.99] {
            assert_eq!(classify_width(w), DeviceClass::Mobile, "{w}");
        }
        for w in [768.0, 800.0, 1023.0, 1023.5] {
            assert_eq!(classify_width(w), DeviceClass::Tablet, "{w}");
        }
        for w in [1024.0, 1440.0, 2560.0, 10_000.0] {
            assert_eq!(classify_width(w), DeviceClass::Desktop, "{w}");
        }
    }

    #[test]
    fn test_classify_degenerate_width_is_mobile() {
        assert_eq!(classify_width(-100.0), DeviceClass::Mobile);
        assert_eq!(classify_width(f64::NAN), DeviceClass::Mobile);
        assert_eq!(classify_width(f64::NEG_INFINITY), DeviceClass::Mobile);
    }

    #[test]
    fn test_desktop_web_uses_sidebar() {
        let layout = resolve_layout(1440.0, Platform::Web);
        assert!(layout.use_sidebar);
        assert!(!layout.use_bottom_nav);
        assert!(layout.use_desktop_composition);
        assert_eq!(layout.device_class, DeviceClass::Desktop);
    }

    #[test]
    fn test_desktop_native_keeps_bottom_nav() {
        let layout = resolve_layout(1440.0, Platform::Native);
        assert!(!layout.use_sidebar);
        assert!(layout.use_bottom_nav);
        assert!(!layout.use_desktop_composition);
        assert_eq!(layout.device_class, DeviceClass::Desktop);
    }

    #[test]
    fn test_phone_and_tablet_use_bottom_nav() {
        assert!(resolve_layout(375.0, Platform::Web).use_bottom_nav);
        assert!(resolve_layout(900.0, Platform::Web).use_bottom_nav);
        assert!(!resolve_layout(900.0, Platform::Web).use_sidebar);
    }

    #[test]
    fn test_sidebar_and_bottom_nav_are_exclusive() {
        for w in [0.0, 320.0, 768.0, 1023.0, 1024.0, 1920.0] {
            for p in [Platform::Web, Platform::Native] {
                let layout = resolve_layout(w, p);
                assert_ne!(layout.use_sidebar, layout.use_bottom_nav);
            }
        }
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(900.0, 300.0), 3);
        assert_eq!(grid_columns(250.0, 300.0), 1);
        assert_eq!(grid_columns(0.0, 300.0), 1);
        assert_eq!(grid_columns(1199.0, 300.0), 3);
        assert_eq!(grid_columns(1200.0, 300.0), 4);
    }

    #[test]
    fn test_grid_columns_clamps_bad_item_width() {
        assert_eq!(grid_columns(900.0, 0.0), 900);
        assert_eq!(grid_columns(900.0, -5.0), 900);
        assert_eq!(grid_columns(f64::NAN, 300.0), 1);
    }

    #[test]
    fn test_layout_columns() {
        let layout = resolve_layout(900.0, Platform::Web);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.columns_for(200.0), 4);
        assert_eq!(resolve_layout(0.0, Platform::Web).columns, 1);
    }

    #[test]
    fn test_pick_variant() {
        assert_eq!(pick_variant(true, "PCHome", "Home"), "PCHome");
        assert_eq!(pick_variant(false, "PCHome", "Home"), "Home");

        let layout = resolve_layout(1280.0, Platform::Web);
        assert_eq!(layout.pick(2, 1), 2);
    }

    #[test]
    fn test_custom_breakpoints() {
        let policy = ResponsivePolicy::new(
            Breakpoints {
                mobile: 600.0,
                tablet: 900.0,
            },
            DEFAULT_ITEM_MIN_WIDTH,
        );
        assert_eq!(policy.classify_width(700.0), DeviceClass::Tablet);
        assert_eq!(policy.classify_width(900.0), DeviceClass::Desktop);
        assert!(policy.resolve_layout(950.0, Platform::Web).use_sidebar);
    }

    #[test]
    fn test_breakpoints_ordering() {
        assert!(Breakpoints::default().is_ordered());
        assert!(!Breakpoints {
            mobile: 1024.0,
            tablet: 768.0
        }
        .is_ordered());
        assert!(!Breakpoints {
            mobile: 0.0,
            tablet: 768.0
        }
        .is_ordered());
    }

    #[test]
    fn test_device_info() {
        let info = DeviceInfo::from_viewport(&Viewport::new(800.0, 1200.0, Platform::Native));
        assert!(info.is_tablet);
        assert!(info.is_large_screen);
        assert!(!info.is_web);
        assert!(!info.is_mobile);

        let phone = DeviceInfo::from_viewport(&Viewport::new(390.0, 844.0, Platform::Web));
        assert!(phone.is_mobile);
        assert!(!phone.is_large_screen);
    }

    #[test]
    fn test_responsive_value_fallback() {
        let value = ResponsiveValue::new(1).desktop(3);
        assert_eq!(value.resolve(DeviceClass::Mobile), 1);
        assert_eq!(value.resolve(DeviceClass::Tablet), 1);
        assert_eq!(value.resolve(DeviceClass::Desktop), 3);
    }

    #[test]
    fn test_scaled_spacing() {
        let pad = padding(16.0, None, None);
        assert_eq!(pad.resolve(DeviceClass::Mobile), 16.0);
        assert_eq!(pad.resolve(DeviceClass::Tablet), 24.0);
        assert_eq!(pad.resolve(DeviceClass::Desktop), 32.0);

        let m = margin(8.0, Some(10.0), None);
        assert_eq!(m.resolve(DeviceClass::Tablet), 10.0);
        assert_eq!(m.resolve(DeviceClass::Desktop), 16.0);

        let font = font_size(10.0, None, None);
        assert!((font.resolve(DeviceClass::Tablet) - 11.0).abs() < 1e-9);
        assert!((font.resolve(DeviceClass::Desktop) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_width_only_on_desktop() {
        assert_eq!(max_width(DeviceClass::Desktop, 1200.0), Some(1200.0));
        assert_eq!(max_width(DeviceClass::Tablet, 1200.0), None);
    }

    #[test]
    fn test_sidebar_width() {
        assert_eq!(sidebar_width(1024.0), 256.0);
        assert_eq!(sidebar_width(1920.0), 300.0);
        assert_eq!(sidebar_width(-1.0), 0.0);
    }
}
