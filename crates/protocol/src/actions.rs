//! W3C pointer action sequences for touch gestures.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Body of `POST /session/{id}/actions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsRequest {
	pub actions: Vec<InputSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSource {
	#[serde(rename = "type")]
	pub kind: String,
	pub id: String,
	pub parameters: PointerParameters,
	pub actions: Vec<PointerAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerParameters {
	pub pointer_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
	PointerMove { duration: u64, x: i64, y: i64 },
	PointerDown { button: u8 },
	PointerUp { button: u8 },
	Pause { duration: u64 },
}

/// Press duration used for a plain tap.
pub const TAP_HOLD_MS: u64 = 100;

impl ActionsRequest {
	fn touch(actions: Vec<PointerAction>) -> Self {
		Self {
			actions: vec![InputSource {
				kind: "pointer".to_string(),
				id: "finger1".to_string(),
				parameters: PointerParameters {
					pointer_type: "touch".to_string(),
				},
				actions,
			}],
		}
	}

	/// Single-finger tap at `at`.
	pub fn tap(at: Point) -> Self {
		Self::touch(vec![
			PointerAction::PointerMove { duration: 0, x: at.x, y: at.y },
			PointerAction::PointerDown { button: 0 },
			PointerAction::Pause { duration: TAP_HOLD_MS },
			PointerAction::PointerUp { button: 0 },
		])
	}

	/// Press at `from`, drag to `to` over `duration_ms`, release.
	pub fn swipe(from: Point, to: Point, duration_ms: u64) -> Self {
		Self::touch(vec![
			PointerAction::PointerMove {
				duration: 0,
				x: from.x,
				y: from.y,
			},
			PointerAction::PointerDown { button: 0 },
			PointerAction::PointerMove {
				duration: duration_ms,
				x: to.x,
				y: to.y,
			},
			PointerAction::PointerUp { button: 0 },
		])
	}
}
