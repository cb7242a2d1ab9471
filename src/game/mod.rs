pub mod controller;
pub mod states;
pub mod toggle;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use controller::{ExclusiveTrackController, StartupState, TrackChannel};
pub use states::Selection;
pub use toggle::ToggleControl;

/// One of the three soundtrack channels the jukebox can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Menu,
    Ambient,
    Battle,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::Menu, Track::Ambient, Track::Battle];

    pub const fn index(self) -> usize {
        match self {
            Track::Menu => 0,
            Track::Ambient => 1,
            Track::Battle => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Track::Menu => "menu",
            Track::Ambient => "ambient",
            Track::Battle => "battle",
        }
    }

    /// The two tracks that must fall silent when `self` is selected.
    pub fn others(self) -> [Track; 2] {
        match self {
            Track::Menu => [Track::Ambient, Track::Battle],
            Track::Ambient => [Track::Menu, Track::Battle],
            Track::Battle => [Track::Menu, Track::Ambient],
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
