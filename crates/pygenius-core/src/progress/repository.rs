//! Learner progress on top of the preference store

use crate::assist::types::{DifficultyLevel, Lesson, LessonType, ScriptEntry};
use crate::error::{PyGeniusError, PyGeniusResult};
use crate::progress::prefs::{PrefValue, Preferences};
use crate::progress::scripts::{EMPTY_MARKER, deserialize_scripts, serialize_scripts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

pub const KEY_STREAK: &str = "coding_streak";
pub const KEY_LAST_ACTIVE: &str = "last_active";
pub const KEY_COMPLETED_LESSONS: &str = "completed_lessons";
pub const KEY_TOTAL_RUNS: &str = "total_runs";
pub const KEY_SCRIPTS: &str = "saved_scripts";
pub const KEY_CURRENT_LESSON: &str = "current_lesson";

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// The lesson last shown to the learner, with the topic it was asked for
#[derive(Debug, Serialize, Deserialize)]
struct ShownLesson {
    kind: LessonType,
    lesson: Lesson,
}

/// Streak, completed lessons, run counter and saved scripts
///
/// Every mutation runs inside one [`Preferences::edit`], so clones sharing
/// a store can be used from several threads.
#[derive(Debug, Clone)]
pub struct UserProgress {
    prefs: Arc<Preferences>,
    previous_visit: Option<i64>,
}

impl UserProgress {
    /// Open progress and apply the daily streak check as of now
    pub fn open(prefs: Arc<Preferences>) -> PyGeniusResult<Self> {
        Self::open_at(prefs, Utc::now())
    }

    /// Open progress and apply the daily streak check as of `now`
    ///
    /// Same day as the last visit leaves the streak alone, the next day
    /// extends it, and any later day resets it. `last_active` is then
    /// moved to `now`.
    pub fn open_at(prefs: Arc<Preferences>, now: DateTime<Utc>) -> PyGeniusResult<Self> {
        let now_ms = now.timestamp_millis();
        let previous_visit = prefs.edit(|values| {
            let previous = int_in(values, KEY_LAST_ACTIVE);
            let today = now_ms.div_euclid(MILLIS_PER_DAY);
            let last_day = previous.unwrap_or(0).div_euclid(MILLIS_PER_DAY);

            if today - last_day == 1 {
                let streak = int_in(values, KEY_STREAK).unwrap_or(0) + 1;
                info!(streak, "Coding streak extended");
                values.insert(KEY_STREAK.to_string(), PrefValue::Int(streak));
            } else if today > last_day {
                debug!(today, last_day, "Streak broken");
                values.insert(KEY_STREAK.to_string(), PrefValue::Int(0));
            }

            values.insert(KEY_LAST_ACTIVE.to_string(), PrefValue::Int(now_ms));
            previous
        })?;

        Ok(Self {
            prefs,
            previous_visit,
        })
    }

    pub fn coding_streak(&self) -> i64 {
        self.prefs.get_i64(KEY_STREAK).unwrap_or(0)
    }

    /// Epoch milliseconds of the last visit
    pub fn last_active(&self) -> i64 {
        self.prefs.get_i64(KEY_LAST_ACTIVE).unwrap_or(0)
    }

    /// `last_active` as it was before this handle was opened
    pub fn previous_visit(&self) -> Option<i64> {
        self.previous_visit
    }

    pub fn total_code_runs(&self) -> i64 {
        self.prefs.get_i64(KEY_TOTAL_RUNS).unwrap_or(0)
    }

    pub fn completed_lessons(&self) -> BTreeSet<String> {
        self.prefs
            .get_string_set(KEY_COMPLETED_LESSONS)
            .unwrap_or_default()
    }

    pub fn increment_streak(&self) -> PyGeniusResult<()> {
        let streak = self.bump(KEY_STREAK)?;
        info!(streak, "Coding streak extended");
        Ok(())
    }

    pub fn reset_streak(&self) -> PyGeniusResult<()> {
        self.prefs.put_i64(KEY_STREAK, 0)
    }

    /// Record a lesson as done; lessons are identified by title
    pub fn mark_lesson_completed(&self, lesson_id: &str) -> PyGeniusResult<()> {
        self.prefs.edit(|values| {
            let entry = values
                .entry(KEY_COMPLETED_LESSONS.to_string())
                .or_insert_with(|| PrefValue::Set(BTreeSet::new()));
            match entry {
                PrefValue::Set(completed) => {
                    completed.insert(lesson_id.to_string());
                }
                other => *other = PrefValue::Set(BTreeSet::from([lesson_id.to_string()])),
            }
        })
    }

    pub fn is_lesson_completed(&self, lesson_id: &str) -> bool {
        self.completed_lessons().contains(lesson_id)
    }

    pub fn increment_code_runs(&self) -> PyGeniusResult<i64> {
        self.bump(KEY_TOTAL_RUNS)
    }

    /// Remember `lesson` as the one on screen for `kind`
    pub fn set_current_lesson(&self, kind: LessonType, lesson: &Lesson) -> PyGeniusResult<()> {
        let shown = ShownLesson {
            kind,
            lesson: lesson.clone(),
        };
        let raw = serde_json::to_string(&shown)
            .map_err(|e| PyGeniusError::storage(format!("Failed to serialize lesson: {}", e)))?;
        self.prefs.put_string(KEY_CURRENT_LESSON, raw)
    }

    /// The last shown lesson, if it was for this topic and level
    pub fn current_lesson(&self, kind: LessonType, level: DifficultyLevel) -> Option<Lesson> {
        let raw = self.prefs.get_string(KEY_CURRENT_LESSON)?;
        let shown: ShownLesson = match serde_json::from_str(&raw) {
            Ok(shown) => shown,
            Err(e) => {
                debug!("Ignoring unreadable current lesson: {}", e);
                return None;
            }
        };
        (shown.kind == kind && shown.lesson.difficulty == level).then_some(shown.lesson)
    }

    /// Save (or overwrite) a script stamped with the current time
    pub fn save_script(&self, name: &str, content: &str) -> PyGeniusResult<()> {
        self.save_script_at(name, content, Utc::now().timestamp_millis())
    }

    pub fn save_script_at(&self, name: &str, content: &str, timestamp: i64) -> PyGeniusResult<()> {
        if name.trim().is_empty() {
            return Err(PyGeniusError::invalid_input("Script name must not be empty"));
        }
        self.prefs.edit(|values| {
            let mut scripts = scripts_in(values);
            scripts.insert(name.to_string(), ScriptEntry::new(content, timestamp));
            store_scripts(values, &scripts);
        })
    }

    pub fn scripts(&self) -> BTreeMap<String, ScriptEntry> {
        let raw = self
            .prefs
            .get_string(KEY_SCRIPTS)
            .unwrap_or_else(|| EMPTY_MARKER.to_string());
        deserialize_scripts(&raw)
    }

    pub fn script(&self, name: &str) -> Option<ScriptEntry> {
        self.scripts().remove(name)
    }

    /// Remove a script; returns whether it existed
    pub fn delete_script(&self, name: &str) -> PyGeniusResult<bool> {
        self.prefs.edit(|values| {
            let mut scripts = scripts_in(values);
            let existed = scripts.remove(name).is_some();
            if existed {
                store_scripts(values, &scripts);
            }
            existed
        })
    }

    /// Add one to an integer counter and return the new value
    fn bump(&self, key: &str) -> PyGeniusResult<i64> {
        self.prefs.edit(|values| {
            let next = int_in(values, key).unwrap_or(0) + 1;
            values.insert(key.to_string(), PrefValue::Int(next));
            next
        })
    }
}

fn int_in(values: &BTreeMap<String, PrefValue>, key: &str) -> Option<i64> {
    match values.get(key) {
        Some(PrefValue::Int(value)) => Some(*value),
        _ => None,
    }
}

fn scripts_in(values: &BTreeMap<String, PrefValue>) -> BTreeMap<String, ScriptEntry> {
    match values.get(KEY_SCRIPTS) {
        Some(PrefValue::Text(raw)) => deserialize_scripts(raw),
        _ => BTreeMap::new(),
    }
}

fn store_scripts(values: &mut BTreeMap<String, PrefValue>, scripts: &BTreeMap<String, ScriptEntry>) {
    let raw = if scripts.is_empty() {
        EMPTY_MARKER.to_string()
    } else {
        serialize_scripts(scripts)
    };
    values.insert(KEY_SCRIPTS.to_string(), PrefValue::Text(raw));
}
