//! Menus that slide in from a window edge when the pointer rests there.

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Right,
}

/// `Off -> Area -> Active -> Hide -> Off`. Menus without a hint strip go
/// straight from `Off` to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Off,
    /// Hint strip showing; a click opens the menu.
    Area,
    Active,
    /// Sliding back out.
    Hide,
}

pub struct EdgeMenu {
    edge: Edge,
    state: MenuState,
    area: f32,
    limit: f32,
    shown: f32,
    zone: RectShape,
}

impl EdgeMenu {
    /// `area` is the thickness of the hint strip (zero for none), `limit`
    /// the thickness of the open menu.
    pub fn new(edge: Edge, area: f32, limit: f32) -> Self {
        Self {
            edge,
            state: MenuState::Off,
            area,
            limit,
            shown: 0.0,
            zone: RectShape::new(Rect::NOTHING),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != MenuState::Off
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Active
    }

    pub fn open(&mut self) {
        self.state = MenuState::Active;
    }

    pub fn hide(&mut self) {
        if self.state != MenuState::Off {
            self.state = MenuState::Hide;
        }
    }

    /// How far the menu has slid in.
    pub fn shown(&self) -> f32 {
        self.shown
    }

    /// The strip along the edge that keeps the menu alive.
    pub fn zone(&self) -> &RectShape {
        &self.zone
    }

    /// Where to paint the menu this frame.
    pub fn panel_rect(&self, screen: Rect) -> Rect {
        match self.edge {
            Edge::Top => Rect::from_min_size(
                pos2(screen.min.x, screen.min.y - self.limit + self.shown),
                vec2(screen.width(), self.limit),
            ),
            Edge::Bottom => Rect::from_min_size(
                pos2(screen.min.x, screen.max.y - self.shown),
                vec2(screen.width(), self.limit),
            ),
            Edge::Right => Rect::from_min_size(
                pos2(screen.max.x - self.shown, screen.min.y),
                vec2(self.limit, screen.height()),
            ),
        }
    }

    fn zone_rect(&self, screen: Rect) -> Rect {
        let thickness = match self.state {
            MenuState::Active | MenuState::Hide => self.limit,
            _ if self.area == 0.0 => self.limit,
            _ => self.area,
        };
        match self.edge {
            Edge::Top => Rect::from_min_max(screen.min, pos2(screen.max.x, screen.min.y + thickness)),
            Edge::Bottom => {
                Rect::from_min_max(pos2(screen.min.x, screen.max.y - thickness), screen.max)
            }
            Edge::Right => {
                Rect::from_min_max(pos2(screen.max.x - thickness, screen.min.y), screen.max)
            }
        }
    }

    /// Advances the state machine by one frame.
    pub fn update(&mut self, pointer: Option<Pos2>, clicked: bool, screen: Rect) {
        self.zone = RectShape::new(self.zone_rect(screen));
        let inside = pointer.is_some_and(|p| screen.contains(p) && self.zone.hit_test(p));

        if !inside {
            match self.state {
                MenuState::Active if clicked || self.area == 0.0 => self.state = MenuState::Hide,
                MenuState::Area => self.state = MenuState::Hide,
                _ => {}
            }
        }

        match self.state {
            MenuState::Off => {
                self.shown = 0.0;
                if inside {
                    self.state = if self.area == 0.0 {
                        MenuState::Active
                    } else {
                        MenuState::Area
                    };
                }
            }
            MenuState::Area => {
                self.shown = (self.shown + MENU_AREA_STEP).min(self.area);
                if clicked {
                    self.state = MenuState::Active;
                }
            }
            MenuState::Active => {
                self.shown = (self.shown + MENU_ACTIVE_STEP).min(self.limit);
            }
            MenuState::Hide => {
                self.shown -= MENU_ACTIVE_STEP;
                if self.shown <= 0.0 {
                    self.shown = 0.0;
                    self.state = MenuState::Off;
                }
            }
        }
    }
}
