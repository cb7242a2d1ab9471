use super::Track;

/// Joint state of the three toggle controls, a 1-of-3-or-none selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    MenuSelected,
    AmbientSelected,
    BattleSelected,
    NoneSelected,
}

impl Selection {
    pub fn of(track: Track) -> Self {
        match track {
            Track::Menu => Selection::MenuSelected,
            Track::Ambient => Selection::AmbientSelected,
            Track::Battle => Selection::BattleSelected,
        }
    }

    pub fn track(self) -> Option<Track> {
        match self {
            Selection::MenuSelected => Some(Track::Menu),
            Selection::AmbientSelected => Some(Track::Ambient),
            Selection::BattleSelected => Some(Track::Battle),
            Selection::NoneSelected => None,
        }
    }
}

impl From<Option<Track>> for Selection {
    fn from(track: Option<Track>) -> Self {
        track.map_or(Selection::NoneSelected, Selection::of)
    }
}
