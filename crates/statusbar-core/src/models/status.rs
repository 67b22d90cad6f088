//! 상태 스냅샷 모델.
//!
//! 작업 단위의 상태별 비율(%)을 표현한다. 스트림으로 들어오는 메시지는
//! 부분 업데이트로 디코딩되어 현재 스냅샷에 병합된다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::error::CoreError;

/// 추적 대상 상태 (닫힌 집합)
///
/// 선언 순서가 곧 표준 표시 순서다. `Ord`도 이 순서를 따른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// 실행 중
    Running,
    /// 일시정지
    Paused,
    /// 강제 종료 또는 비정상 종료
    Killed,
    /// 정상 완료
    Done,
}

impl TaskState {
    /// 표준 순서의 전체 상태 목록
    pub const ALL: [TaskState; 4] = [
        TaskState::Running,
        TaskState::Paused,
        TaskState::Killed,
        TaskState::Done,
    ];

    /// 와이어 프로토콜 필드 이름
    pub fn key(self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Paused => "paused",
            TaskState::Killed => "killed",
            TaskState::Done => "done",
        }
    }

    /// 툴팁 등에 표시할 라벨
    pub fn label(self) -> &'static str {
        match self {
            TaskState::Running => "Running",
            TaskState::Paused => "Paused",
            TaskState::Killed => "Killed/Exited",
            TaskState::Done => "Done",
        }
    }

    /// 필드 이름으로 상태 조회
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.key() == key)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 상태별 비율 스냅샷
///
/// 값은 개념상 0~100 이지만 검증하지 않는다. 합계가 100이 아니어도 그대로 둔다.
/// 키가 없을 수 있으며, 표시할 때는 0으로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSnapshot {
    values: BTreeMap<TaskState, f64>,
}

impl StatusSnapshot {
    /// 빈 스냅샷 (모든 키 없음)
    pub fn new() -> Self {
        Self::default()
    }

    /// 첫 메시지를 받기 전의 스냅샷
    ///
    /// 아무것도 알 수 없는 상태는 전부 종료된 것으로 표시한다.
    pub fn initial() -> Self {
        Self::from_pairs([
            (TaskState::Running, 0.0),
            (TaskState::Paused, 0.0),
            (TaskState::Killed, 100.0),
            (TaskState::Done, 0.0),
        ])
    }

    /// (상태, 비율) 쌍으로 생성
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (TaskState, f64)>,
    {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// 상태 값 조회 (없으면 `None`)
    pub fn get(&self, state: TaskState) -> Option<f64> {
        self.values.get(&state).copied()
    }

    /// 표시용 비율 (없으면 0)
    pub fn percentage(&self, state: TaskState) -> f64 {
        self.get(state).unwrap_or(0.0)
    }

    /// 상태 값 설정
    pub fn set(&mut self, state: TaskState, value: f64) {
        self.values.insert(state, value);
    }

    /// 표준 순서로 존재하는 (상태, 값) 순회
    pub fn iter(&self) -> impl Iterator<Item = (TaskState, f64)> + '_ {
        self.values.iter().map(|(state, value)| (*state, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 부분 업데이트 병합
    ///
    /// `update`에 있는 필드만 덮어쓰고 나머지는 이전 값을 유지한다.
    pub fn merge(&mut self, update: &StatusSnapshot) {
        for (state, value) in update.iter() {
            self.values.insert(state, value);
        }
    }

    /// 원시 메시지를 부분 업데이트로 디코딩
    ///
    /// JSON 객체만 허용한다. 알 수 없는 필드는 무시하고, 인식한 필드라도
    /// 값을 해석할 수 없으면 그 필드만 건너뛴다.
    ///
    /// # Errors
    /// JSON이 아니면 `CoreError::Serialization`, 객체가 아니면 `CoreError::Decode`
    pub fn decode(raw: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::Decode(format!("JSON 객체가 아님: {}", json_kind(&value))))?;

        let mut update = Self::new();
        for state in TaskState::ALL {
            let Some(field) = object.get(state.key()) else {
                continue;
            };
            match parse_percentage(field) {
                Some(percentage) => update.set(state, percentage),
                None => debug!("해석할 수 없는 비율 값 무시: {state}={field}"),
            }
        }
        Ok(update)
    }
}

/// 비율 값 해석
///
/// 숫자, 숫자 문자열("50"), 퍼센트 문자열("50%")을 허용한다.
fn parse_percentage(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_end_matches('%')
            .trim_end()
            .parse::<f64>()
            .ok()
            .filter(|percentage| percentage.is_finite()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
