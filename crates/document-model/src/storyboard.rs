//! Storyboards: ordered animation sequences that play on composition in/out.

use std::fmt;

use gtcompose_common::error::{GtError, GtResult};
use serde::{Deserialize, Serialize};

use crate::object::ObjectRef;

/// Timed animation effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    Reveal,
    Fade,
    Bounce,
    Expand,
    Fly,
    Hidden,
    Rotate,
    Zoom,
    ZoomFade,
}

impl AnimationKind {
    /// Element name in the package format.
    pub fn tag(&self) -> &'static str {
        match self {
            AnimationKind::Reveal => "Reveal",
            AnimationKind::Fade => "Fade",
            AnimationKind::Bounce => "Bounce",
            AnimationKind::Expand => "Expand",
            AnimationKind::Fly => "Fly",
            AnimationKind::Hidden => "Hidden",
            AnimationKind::Rotate => "Rotate",
            AnimationKind::Zoom => "Zoom",
            AnimationKind::ZoomFade => "ZoomFade",
        }
    }

    pub fn uses_interpolation(&self) -> bool {
        !matches!(self, AnimationKind::Bounce | AnimationKind::Hidden)
    }

    pub fn uses_direction(&self) -> bool {
        matches!(
            self,
            AnimationKind::Reveal
                | AnimationKind::Bounce
                | AnimationKind::Expand
                | AnimationKind::Fly
                | AnimationKind::Rotate
        )
    }

    pub fn uses_center_axis(&self) -> bool {
        matches!(self, AnimationKind::Reveal)
    }

    pub fn uses_reverse(&self) -> bool {
        matches!(
            self,
            AnimationKind::Reveal | AnimationKind::Fade | AnimationKind::Expand | AnimationKind::Fly
        )
    }
}

/// Easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    CubicEasingIn,
    CubicEasingOut,
    CubicEasingInOut,
    BounceIn,
    BounceOut,
}

/// Direction an animation travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Down,
    #[default]
    Left,
    Right,
}

/// Axis a reveal opens around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CenterAxis {
    #[default]
    X,
    Y,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for CenterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One timed effect applied to one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    kind: AnimationKind,
    target: ObjectRef,
    start: f64,
    duration: f64,
    interpolation: Interpolation,
    direction: Direction,
    center_axis: CenterAxis,
    reverse: Option<bool>,
}

impl Animation {
    /// Fails with `InvalidTiming` unless `start >= 0` and `duration > 0`.
    pub fn new(
        kind: AnimationKind,
        target: impl Into<ObjectRef>,
        start: f64,
        duration: f64,
    ) -> GtResult<Self> {
        let valid = start.is_finite() && duration.is_finite() && start >= 0.0 && duration > 0.0;
        if !valid {
            return Err(GtError::invalid_timing(start, duration));
        }
        Ok(Self {
            kind,
            target: target.into(),
            start,
            duration,
            interpolation: Interpolation::default(),
            direction: Direction::default(),
            center_axis: CenterAxis::default(),
            reverse: None,
        })
    }

    pub fn reveal(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Reveal, target, start, duration)
    }

    pub fn fade(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Fade, target, start, duration)
    }

    pub fn bounce(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Bounce, target, start, duration)
    }

    pub fn expand(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Expand, target, start, duration)
    }

    pub fn fly(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Fly, target, start, duration)
    }

    pub fn hidden(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Hidden, target, start, duration)
    }

    pub fn rotate(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Rotate, target, start, duration)
    }

    pub fn zoom(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::Zoom, target, start, duration)
    }

    pub fn zoom_fade(target: impl Into<ObjectRef>, start: f64, duration: f64) -> GtResult<Self> {
        Self::new(AnimationKind::ZoomFade, target, start, duration)
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_center_axis(mut self, axis: CenterAxis) -> Self {
        self.center_axis = axis;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn target(&self) -> &ObjectRef {
        &self.target
    }

    /// Seconds after the storyboard starts.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn center_axis(&self) -> CenterAxis {
        self.center_axis
    }

    pub fn reverse(&self) -> Option<bool> {
        self.reverse
    }
}

/// When a storyboard plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StoryboardType {
    #[default]
    TransitionIn,
    TransitionOut,
}

impl StoryboardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryboardType::TransitionIn => "TransitionIn",
            StoryboardType::TransitionOut => "TransitionOut",
        }
    }
}

/// Ordered list of animations; the order is the playback sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Storyboard {
    kind: StoryboardType,
    animations: Vec<Animation>,
}

impl Storyboard {
    pub fn new(kind: StoryboardType) -> Self {
        Self {
            kind,
            animations: Vec::new(),
        }
    }

    pub fn transition_in() -> Self {
        Self::new(StoryboardType::TransitionIn)
    }

    pub fn transition_out() -> Self {
        Self::new(StoryboardType::TransitionOut)
    }

    pub fn kind(&self) -> StoryboardType {
        self.kind
    }

    pub fn append(&mut self, animation: Animation) -> &mut Self {
        self.animations.push(animation);
        self
    }

    /// Validate and append a reveal in one step.
    pub fn reveal(
        &mut self,
        target: impl Into<ObjectRef>,
        start: f64,
        duration: f64,
    ) -> GtResult<&mut Self> {
        let animation = Animation::reveal(target, start, duration)?;
        Ok(self.append(animation))
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_defaults() {
        let anim = Animation::reveal("Rect 1", 0.0, 2.0).unwrap();
        assert_eq!(anim.kind(), AnimationKind::Reveal);
        assert_eq!(anim.target().name(), "Rect 1");
        assert_eq!(anim.interpolation(), Interpolation::Linear);
        assert_eq!(anim.direction(), Direction::Left);
        assert_eq!(anim.center_axis(), CenterAxis::X);
        assert_eq!(anim.reverse(), None);
    }

    #[test]
    fn test_invalid_timing_is_rejected() {
        for (start, duration) in [(-1.0, 2.0), (0.0, 0.0), (1.0, -3.0), (f64::NAN, 1.0)] {
            let err = Animation::reveal("R", start, duration).unwrap_err();
            assert!(matches!(err, GtError::InvalidTiming { .. }));
        }
    }

    #[test]
    fn test_rejected_animation_is_not_appended() {
        let mut storyboard = Storyboard::transition_in();
        storyboard.reveal("R", 0.0, 2.0).unwrap();
        assert!(storyboard.reveal("T", -1.0, 2.0).is_err());
        assert_eq!(storyboard.len(), 1);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut storyboard = Storyboard::default();
        storyboard
            .append(Animation::reveal("rect1", 0.0, 2.0).unwrap())
            .append(Animation::fade("text1", 1.0, 2.0).unwrap());
        let targets: Vec<&str> = storyboard
            .animations()
            .iter()
            .map(|a| a.target().name())
            .collect();
        assert_eq!(targets, ["rect1", "text1"]);
        assert_eq!(storyboard.kind(), StoryboardType::TransitionIn);
    }

    #[test]
    fn test_kind_attribute_sets() {
        assert!(AnimationKind::Reveal.uses_center_axis());
        assert!(!AnimationKind::Fade.uses_direction());
        assert!(!AnimationKind::Hidden.uses_interpolation());
        assert!(AnimationKind::Bounce.uses_direction());
        assert!(!AnimationKind::Zoom.uses_reverse());
        assert_eq!(Interpolation::CubicEasingInOut.to_string(), "CubicEasingInOut");
    }
}
