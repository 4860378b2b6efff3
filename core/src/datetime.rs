// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod range;
mod util;

pub use range::{DateRange, DateTimeRange, WeekStart};
pub use util::{RangePosition, STABLE_FORMAT_DATEONLY, end_of_day, start_of_day};
pub(crate) use util::{add_months, days_in_month};
