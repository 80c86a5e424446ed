//! Push-Profile-Request/Answer: HSS-initiated profile/charging-address
//! update, pushed outside any registration flow.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    avp::Message,
    cx::{
        AUTH_SESSION_STATE_NO_STATE_MAINTAINED, CX_APPLICATION_ID, command_codes,
        read_charging_addresses,
    },
    model::charging::ChargingAddresses,
};

#[derive(Debug, Clone, Default)]
pub struct PprRequest {
    pub session_id: String,
    pub impi: String,
    pub user_data: Option<String>,
    pub charging_addrs: Option<ChargingAddresses>,
}

pub fn read(msg: &Message) -> PprRequest {
    PprRequest {
        session_id: msg.session_id.clone(),
        impi: msg.get_str("UserName").unwrap_or_default().to_string(),
        user_data: msg.get_str("UserData").map(String::from),
        charging_addrs: read_charging_addresses(msg),
    }
}

pub struct PpaAnswer<'a> {
    pub session_id: &'a str,
    pub result_code: i32,
}

pub fn build_answer(ans: &PpaAnswer<'_>) -> Message {
    let mut msg = Message::new(command_codes::PUSH_PROFILE, CX_APPLICATION_ID, false);
    msg.session_id = ans.session_id.to_string();
    msg.push_i32("ResultCode", ans.result_code);
    msg.push_i32(
        "AuthSessionState",
        AUTH_SESSION_STATE_NO_STATE_MAINTAINED,
    );
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_user_data_and_impi() {
        let mut msg = Message::new(305, CX_APPLICATION_ID, true);
        msg.push_str("UserName", "impi@ex");
        msg.push_str("UserData", "<IMSSubscription/>");
        let req = read(&msg);
        assert_eq!(req.impi, "impi@ex");
        assert_eq!(req.user_data.as_deref(), Some("<IMSSubscription/>"));
    }

    #[test]
    fn build_answer_carries_result_code() {
        let ans = PpaAnswer {
            session_id: "s1",
            result_code: 5012,
        };
        let msg = build_answer(&ans);
        assert_eq!(msg.get_i32("ResultCode"), Some(5012));
        assert_eq!(msg.session_id, "s1");
    }
}
