//! Domain types shared by the codec, cache and handler layers.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod auth_vector;
pub mod cached_record;
pub mod charging;
pub mod identity;
pub mod irs;
pub mod reg_state;
pub mod server_caps;
