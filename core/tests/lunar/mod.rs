// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lunar/solar reconciliation through the public API of lunarcal-core.

mod calendar;
mod conversion;
