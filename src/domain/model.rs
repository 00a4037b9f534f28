use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned when a name list is parsed.
///
/// `generation` changes on every parse, so identifiers are only stable for the
/// lifetime of one in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId {
    pub generation: u64,
    pub index: usize,
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.generation, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Participant>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSettings {
    pub draw_count: usize,
    pub allow_repeat: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            draw_count: 1,
            allow_repeat: false,
        }
    }
}

/// 中獎歷史的一筆，`ordinal` 越大越新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub ordinal: usize,
    pub participant: Participant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    List,
    LuckyDraw,
    Grouping,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::List => "名單管理",
            Screen::LuckyDraw => "獎品抽籤",
            Screen::Grouping => "自動分組",
        }
    }
}

/// 名單編輯畫面的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub count: usize,
    pub duplicates: Vec<String>,
    pub preview: String,
}
