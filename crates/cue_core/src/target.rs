//! Animation targets and the animatable property model
//!
//! The engine never touches a UI tree directly. Everything it animates is
//! reached through the [`Target`] trait: a bounding-rect query (used by
//! scroll triggers) and a property write sink (used by timelines). Target
//! collections are resolved once at scope construction and stay immutable
//! for the scope's lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::geometry::Rect;

/// The fixed vocabulary of animatable properties
///
/// Property kinds follow the interpolator contract: scalars are unitless,
/// lengths carry pixels (percent for `Width`), angles carry degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Opacity, unitless 0..1
    Opacity,
    /// Horizontal translation, px
    TranslateX,
    /// Vertical translation, px
    TranslateY,
    /// Z-axis rotation, degrees
    Rotate,
    /// Y-axis rotation (3D turn), degrees
    RotateY,
    /// Uniform scale factor, unitless
    Scale,
    /// Blur radius, px
    Blur,
    /// Width as a fraction of the parent, 0..1
    Width,
}

impl PropertyKind {
    /// Every animatable property, in canonical order
    pub const ALL: [PropertyKind; 8] = [
        PropertyKind::Opacity,
        PropertyKind::TranslateX,
        PropertyKind::TranslateY,
        PropertyKind::Rotate,
        PropertyKind::RotateY,
        PropertyKind::Scale,
        PropertyKind::Blur,
        PropertyKind::Width,
    ];

    /// Resolve a property name from the string vocabulary
    ///
    /// Unknown names are a [`ConfigError`] at construction time, never a
    /// tick-time failure.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "opacity" => Ok(Self::Opacity),
            "x" | "translateX" => Ok(Self::TranslateX),
            "y" | "translateY" => Ok(Self::TranslateY),
            "rotate" | "rotation" => Ok(Self::Rotate),
            "rotateY" => Ok(Self::RotateY),
            "scale" => Ok(Self::Scale),
            "blur" => Ok(Self::Blur),
            "width" => Ok(Self::Width),
            other => Err(ConfigError::UnknownProperty(other.to_string())),
        }
    }
}

/// A resolved set of property values written to a target each frame
///
/// Unset fields are untouched on write, so two timelines animating disjoint
/// properties of the same target compose. When they overlap, the later
/// write within a tick wins (entry/registration order).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetProps {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotate: Option<f32>,
    /// Rotation Y in degrees (3D turn)
    pub rotate_y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Blur radius in pixels
    pub blur: Option<f32>,
    /// Width fraction (0.0 to 1.0)
    pub width: Option<f32>,
}

impl TargetProps {
    /// Create props with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set translation X
    pub fn with_translate_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    /// Builder: set translation Y
    pub fn with_translate_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    /// Builder: set Z rotation
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Builder: set Y rotation
    pub fn with_rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set blur radius
    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Builder: set width fraction
    pub fn with_width(mut self, fraction: f32) -> Self {
        self.width = Some(fraction);
        self
    }

    /// Get a field by property kind
    pub fn get(&self, kind: PropertyKind) -> Option<f32> {
        match kind {
            PropertyKind::Opacity => self.opacity,
            PropertyKind::TranslateX => self.translate_x,
            PropertyKind::TranslateY => self.translate_y,
            PropertyKind::Rotate => self.rotate,
            PropertyKind::RotateY => self.rotate_y,
            PropertyKind::Scale => self.scale,
            PropertyKind::Blur => self.blur,
            PropertyKind::Width => self.width,
        }
    }

    /// Set a field by property kind
    pub fn set(&mut self, kind: PropertyKind, value: f32) {
        match kind {
            PropertyKind::Opacity => self.opacity = Some(value),
            PropertyKind::TranslateX => self.translate_x = Some(value),
            PropertyKind::TranslateY => self.translate_y = Some(value),
            PropertyKind::Rotate => self.rotate = Some(value),
            PropertyKind::RotateY => self.rotate_y = Some(value),
            PropertyKind::Scale => self.scale = Some(value),
            PropertyKind::Blur => self.blur = Some(value),
            PropertyKind::Width => self.width = Some(value),
        }
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            rotate_y: lerp_opt(self.rotate_y, other.rotate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            blur: lerp_opt(self.blur, other.blur, t),
            width: lerp_opt(self.width, other.width, t),
        }
    }

    /// Overlay another set on top of this one (set fields win)
    pub fn merge(&mut self, other: &Self) {
        for kind in PropertyKind::ALL {
            if let Some(value) = other.get(kind) {
                self.set(kind, value);
            }
        }
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// The write sink the engine animates through
///
/// `bounds()` returns `None` while the target is detached from the UI; a
/// detached target makes its trigger inert and its tween writes no-ops,
/// never an error.
pub trait Target {
    /// Current bounding rect in absolute document coordinates
    fn bounds(&self) -> Option<Rect>;

    /// Write the given property state for this frame
    fn apply(&mut self, props: &TargetProps);
}

/// Shared handle to a target, cloned into tweens and triggers
pub type TargetHandle = Rc<RefCell<dyn Target>>;

/// In-memory target used by tests and headless demos
///
/// Records every applied property set merged into `props`, and can be
/// detached to simulate an unmounted element.
#[derive(Clone, Debug, Default)]
pub struct StubTarget {
    pub rect: Rect,
    pub props: TargetProps,
    pub attached: bool,
    pub apply_count: u32,
}

impl StubTarget {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            props: TargetProps::default(),
            attached: true,
            apply_count: 0,
        }
    }

    /// Create a shared stub, returning the typed handle for inspection
    pub fn shared(rect: Rect) -> Rc<RefCell<StubTarget>> {
        Rc::new(RefCell::new(Self::new(rect)))
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn reattach(&mut self) {
        self.attached = true;
    }
}

impl Target for StubTarget {
    fn bounds(&self) -> Option<Rect> {
        self.attached.then_some(self.rect)
    }

    fn apply(&mut self, props: &TargetProps) {
        self.props.merge(props);
        self.apply_count += 1;
    }
}
