pub use kurbo::{Point, Vec2};

/// Number of keypoint slots in every pose (COCO-17 layout).
pub const KEYPOINT_COUNT: usize = 17;

/// COCO-17 keypoint slot indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum KeypointIndex {
    /// Nose.
    Nose = 0,
    /// Left eye.
    LeftEye = 1,
    /// Right eye.
    RightEye = 2,
    /// Left ear.
    LeftEar = 3,
    /// Right ear.
    RightEar = 4,
    /// Left shoulder.
    LeftShoulder = 5,
    /// Right shoulder.
    RightShoulder = 6,
    /// Left elbow.
    LeftElbow = 7,
    /// Right elbow.
    RightElbow = 8,
    /// Left wrist.
    LeftWrist = 9,
    /// Right wrist.
    RightWrist = 10,
    /// Left hip.
    LeftHip = 11,
    /// Right hip.
    RightHip = 12,
    /// Left knee.
    LeftKnee = 13,
    /// Right knee.
    RightKnee = 14,
    /// Left ankle.
    LeftAnkle = 15,
    /// Right ankle.
    RightAnkle = 16,
}

impl KeypointIndex {
    /// Map a positional slot back to its name.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEye),
            2 => Some(Self::RightEye),
            3 => Some(Self::LeftEar),
            4 => Some(Self::RightEar),
            5 => Some(Self::LeftShoulder),
            6 => Some(Self::RightShoulder),
            7 => Some(Self::LeftElbow),
            8 => Some(Self::RightElbow),
            9 => Some(Self::LeftWrist),
            10 => Some(Self::RightWrist),
            11 => Some(Self::LeftHip),
            12 => Some(Self::RightHip),
            13 => Some(Self::LeftKnee),
            14 => Some(Self::RightKnee),
            15 => Some(Self::LeftAnkle),
            16 => Some(Self::RightAnkle),
            _ => None,
        }
    }
}

/// One keypoint: position plus detector confidence.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keypoint {
    /// Horizontal coordinate (normalized `0..1` unless stated otherwise).
    pub x: f64,
    /// Vertical coordinate (normalized `0..1` unless stated otherwise).
    pub y: f64,
    /// Confidence score; `0` marks a missing keypoint.
    pub confidence: f64,
}

impl Keypoint {
    /// Create a keypoint.
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    /// `true` unless this slot was synthesized for a missing detection.
    pub fn is_present(&self) -> bool {
        self.confidence > 0.0
    }

    /// Position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A full 17-slot pose. Slots are never omitted; missing ones are `(0, 0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Keypoints in COCO-17 order.
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl Pose {
    /// Wrap a keypoint array.
    pub fn new(keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Keypoint at a named slot.
    pub fn get(&self, index: KeypointIndex) -> &Keypoint {
        &self.keypoints[index as usize]
    }

    /// Euclidean distance between two slots.
    pub fn span(&self, a: KeypointIndex, b: KeypointIndex) -> f64 {
        let (a, b) = (self.get(a), self.get(b));
        (a.x - b.x).hypot(a.y - b.y)
    }

    /// Mean confidence over all slots.
    pub fn average_confidence(&self) -> f64 {
        let sum: f64 = self.keypoints.iter().map(|k| k.confidence).sum();
        sum / KEYPOINT_COUNT as f64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// One recorded frame as it appears in a source JSONL file.
///
/// Keypoints may be normalized or in pixel space and may hold fewer than 17 entries.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawFrame {
    /// Source width in pixels (`0` when unknown).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: f64,
    /// Source height in pixels (`0` when unknown).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: f64,
    /// Raw `[x, y, confidence?]` entries.
    #[serde(
        default,
        alias = "keypoints",
        deserialize_with = "lenient_keypoints"
    )]
    pub kpts: Vec<Vec<f64>>,
    /// Playback rate hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    /// Capture time in milliseconds.
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub ts: Option<f64>,
    /// Recording id, used when one JSONL file holds several recordings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_id: Option<String>,
}

/// Reads `null` and non-numeric values as `0`; numeric strings are parsed.
pub(crate) fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    let value = match Option::<serde_json::Value>::deserialize(de)? {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()).unwrap_or(0.0))
}

// Entries that are not numeric arrays become empty (missing) slots rather than a parse error.
fn lenient_keypoints<'de, D>(de: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    let raw = Option::<Vec<serde_json::Value>>::deserialize(de)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|entry| match entry {
            serde_json::Value::Array(parts) => parts
                .iter()
                .map(|v| v.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0))
                .collect(),
            _ => Vec::new(),
        })
        .collect())
}

/// Where a buffered frame came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrigin {
    /// Read from a recorded segment.
    #[default]
    Source,
    /// Interpolated at a seam between two segments.
    Blend,
    /// Stand-in emitted when no window index is available.
    Placeholder,
    /// Live input pushed by the caller.
    Live,
}

/// A normalized frame ready for playback.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoseFrame {
    /// Width in pixels used to map the normalized pose on screen.
    pub width: u32,
    /// Height in pixels used to map the normalized pose on screen.
    pub height: u32,
    /// Normalized pose.
    pub pose: Pose,
    /// Playback rate hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    /// Capture time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Provenance of the frame.
    #[serde(default)]
    pub origin: FrameOrigin,
}

impl PoseFrame {
    /// Empty-keypoint frame used when there is no geometry to stitch.
    pub fn placeholder(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pose: Pose::default(),
            fps: None,
            timestamp: None,
            origin: FrameOrigin::Placeholder,
        }
    }

    /// Live-input frame.
    pub fn live(pose: Pose, canvas: Canvas, fps: f64) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pose,
            fps: Some(fps),
            timestamp: None,
            origin: FrameOrigin::Live,
        }
    }

    /// Frame canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

impl From<&PoseFrame> for RawFrame {
    fn from(frame: &PoseFrame) -> Self {
        let kpts = if frame.origin == FrameOrigin::Placeholder {
            Vec::new()
        } else {
            frame
                .pose
                .keypoints
                .iter()
                .map(|k| vec![k.x, k.y, k.confidence])
                .collect()
        };
        Self {
            width: f64::from(frame.width),
            height: f64::from(frame.height),
            kpts,
            fps: frame.fps,
            ts: frame.timestamp,
            seq_id: None,
        }
    }
}

/// Anything that can serve as a boundary pose at a seam.
///
/// Recorded frames are normalized on demand; buffered frames already are.
pub trait PoseSample {
    /// Pose in normalized coordinates.
    fn normalized_pose(&self) -> Pose;
    /// `false` when the frame carries no keypoints at all.
    fn has_keypoints(&self) -> bool;
    /// Pixel size, if known.
    fn frame_size(&self) -> Option<Canvas>;
    /// Playback rate hint, if known.
    fn frame_fps(&self) -> Option<f64>;
}

impl PoseSample for PoseFrame {
    fn normalized_pose(&self) -> Pose {
        self.pose
    }

    fn has_keypoints(&self) -> bool {
        self.origin != FrameOrigin::Placeholder
    }

    fn frame_size(&self) -> Option<Canvas> {
        (self.width > 0 && self.height > 0).then(|| self.canvas())
    }

    fn frame_fps(&self) -> Option<f64> {
        self.fps.filter(|f| *f > 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
