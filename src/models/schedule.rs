use super::shift::ShiftKey;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Start/end boundary of one shift. `end < start` means the shift ends on
/// the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl ShiftWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Build from `(hour, minute)` pairs; out-of-range parts clamp to 00:00.
    pub fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        let t = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self::new(t(start), t(end))
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }
}

/// Shift key → window. The default is the built-in table used by stores
/// without a custom schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftSchedule {
    shifts: BTreeMap<ShiftKey, ShiftWindow>,
}

impl ShiftSchedule {
    pub fn empty() -> Self {
        Self {
            shifts: BTreeMap::new(),
        }
    }

    /// pagi 07:00–15:00, siang 15:00–23:00, malam 23:00–07:00
    pub fn builtin() -> Self {
        let mut s = Self::empty();
        s.set(ShiftKey::Pagi, ShiftWindow::hm((7, 0), (15, 0)));
        s.set(ShiftKey::Siang, ShiftWindow::hm((15, 0), (23, 0)));
        s.set(ShiftKey::Malam, ShiftWindow::hm((23, 0), (7, 0)));
        s
    }

    pub fn set(&mut self, key: ShiftKey, window: ShiftWindow) {
        self.shifts.insert(key, window);
    }

    pub fn get(&self, key: ShiftKey) -> Option<&ShiftWindow> {
        self.shifts.get(&key)
    }

    /// Window for `key`, taken from the built-in table when this schedule
    /// does not define it.
    pub fn window(&self, key: ShiftKey) -> ShiftWindow {
        match self.shifts.get(&key) {
            Some(w) => *w,
            None => *Self::builtin()
                .shifts
                .get(&key)
                .unwrap_or(&ShiftWindow::hm((0, 0), (0, 0))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShiftKey, &ShiftWindow)> {
        self.shifts.iter()
    }
}

impl Default for ShiftSchedule {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `NaiveTime` as "HH:MM" (seconds are accepted on input).
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| D::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
    }
}
