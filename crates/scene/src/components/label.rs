use foundation::math::Vec3;

/// Floating text tag above a landmark.
///
/// The anchor is fixed at compose time; visibility is decided per frame
/// by the session (hovered or selected).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Vec3,
}

impl Label {
    pub fn new(text: impl Into<String>, anchor: Vec3) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }
}
