//! Screen routing and navigation chrome
//!
//! Screens form a closed set of routes. The host maps each route to its own
//! view; this module only decides which route is active and which chrome
//! (sidebar or bottom tabs) frames it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BoardError;
use crate::responsive::sidebar_width;
use crate::types::LayoutDecision;

/// Top-level screens of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Home,
    Explore,
    #[serde(rename = "AIAssistant")]
    AiAssistant,
    Portfolio,
    Profile,
}

impl Route {
    /// Routes in navigation order
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Explore,
        Route::AiAssistant,
        Route::Portfolio,
        Route::Profile,
    ];

    /// Route key used by hosts and deep links
    pub fn key(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Explore => "Explore",
            Route::AiAssistant => "AIAssistant",
            Route::Portfolio => "Portfolio",
            Route::Profile => "Profile",
        }
    }

    /// Lenient lookup: unknown keys land on Home.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    /// Sidebar entry title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "ホーム",
            Route::Explore => "探究する",
            Route::AiAssistant => "AI支援",
            Route::Portfolio => "ポートフォリオ",
            Route::Profile => "プロフィール",
        }
    }

    /// Sidebar icon name
    pub fn sidebar_icon(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Explore => "compass",
            Route::AiAssistant => "robot",
            Route::Portfolio => "folder",
            Route::Profile => "account",
        }
    }

    /// Bottom tab label
    pub fn tab_label(&self) -> &'static str {
        match self {
            Route::Home => "ホーム",
            Route::Explore => "探究学習",
            Route::AiAssistant => "AI支援",
            Route::Portfolio => "ポートフォリオ",
            Route::Profile => "プロフィール",
        }
    }

    /// Bottom tab icon name; focused tabs use the filled variant
    pub fn tab_icon(&self, focused: bool) -> &'static str {
        match (self, focused) {
            (Route::Home, true) => "home",
            (Route::Home, false) => "home-outline",
            (Route::Explore, true) => "search",
            (Route::Explore, false) => "search-outline",
            (Route::AiAssistant, true) => "bulb",
            (Route::AiAssistant, false) => "bulb-outline",
            (Route::Portfolio, true) => "folder",
            (Route::Portfolio, false) => "folder-outline",
            (Route::Profile, true) => "person",
            (Route::Profile, false) => "person-outline",
        }
    }
}

impl FromStr for Route {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .iter()
            .copied()
            .find(|r| r.key() == s)
            .ok_or_else(|| BoardError::UnknownRoute(s.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Footer actions of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SidebarAction {
    Settings,
    Logout,
}

impl SidebarAction {
    pub const ALL: [SidebarAction; 2] = [SidebarAction::Settings, SidebarAction::Logout];

    pub fn title(&self) -> &'static str {
        match self {
            SidebarAction::Settings => "設定",
            SidebarAction::Logout => "ログアウト",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SidebarAction::Settings => "cog",
            SidebarAction::Logout => "logout",
        }
    }
}

/// Account type of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
        }
    }

    /// Account label shown under the sidebar avatar
    pub fn account_label(&self) -> String {
        let role = match self {
            UserRole::Student => "生徒",
            UserRole::Teacher => "教師",
        };
        format!("{role}アカウント")
    }
}

/// Navigation frame around a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationChrome {
    Sidebar,
    BottomTabs,
}

impl NavigationChrome {
    pub fn from_layout(layout: &LayoutDecision) -> Self {
        if layout.use_sidebar {
            NavigationChrome::Sidebar
        } else {
            NavigationChrome::BottomTabs
        }
    }
}

/// What the host should mount for the active route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPlan {
    pub route: Route,
    pub chrome: NavigationChrome,
    /// Mount the desktop variant of the screen
    pub desktop_composition: bool,
    /// Sidebar width when the sidebar is shown
    pub sidebar_width: Option<f64>,
}

impl ScreenPlan {
    pub fn new(route: Route, layout: &LayoutDecision) -> Self {
        let chrome = NavigationChrome::from_layout(layout);
        let sidebar_width =
            (chrome == NavigationChrome::Sidebar).then(|| sidebar_width(layout.width));

        Self {
            route,
            chrome,
            desktop_composition: layout.use_desktop_composition,
            sidebar_width,
        }
    }
}

/// Tracks the active route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigate by key. Unknown keys fall back to Home.
    pub fn navigate(&mut self, key: &str) -> Route {
        let route = Route::from_key(key);
        if route.key() != key {
            debug!(key, "unknown route key, falling back to {}", route);
        }
        self.current = route;
        route
    }

    pub fn navigate_to(&mut self, route: Route) {
        self.current = route;
    }

    pub fn plan(&self, layout: &LayoutDecision) -> ScreenPlan {
        ScreenPlan::new(self.current, layout)
    }
}
