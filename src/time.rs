/*
  Corvid, a UCI-compatible chess engine.
  Copyright (C) 2026 The Corvid Authors.

  Corvid is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Corvid is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Time management: deciding, from UCI `go` parameters, how many
//! milliseconds to allot to the current search.
//!
//! For now Corvid is not so intelligent, and instead rations time to itself
//! indiscriminately using a fixed fraction of the remaining clock, with a
//! flat buffer withheld to leave room for the engine to notice the
//! deadline and still emit `bestmove` in time.

/// Milliseconds withheld from every budget so that the search has time left
/// over to stop, unwind its recursion, and print `bestmove` before the GUI's
/// own clock runs out.
const BUFFER_MS: i64 = 100;

/// The floor every computed budget is clamped to, so a near-zero or
/// negative clock reading never yields a budget of zero.
const MIN_BUDGET_MS: i64 = 10;

/// If `movestogo` is absent or out of this range, a fixed assumption of
/// `DEFAULT_MOVES_REMAINING` moves left is used instead.
const MOVESTOGO_RANGE_EXCLUSIVE_MAX: u32 = 80;
const DEFAULT_MOVES_REMAINING: i64 = 35;

/// Used when neither `movetime` nor a clock reading is given at all.
const DEFAULT_BUDGET_MS: i64 = 2000;

#[derive(Clone, Copy, Debug, Default)]
/// The subset of a UCI `go` command's parameters relevant to time
/// management. Any field left `None` means the GUI did not supply it.
pub struct TimeControl {
    pub movetime: Option<u32>,
    pub my_time: Option<u32>,
    pub my_inc: u32,
    pub movestogo: Option<u32>,
}

/// Compute how many milliseconds to search for, given the side to move's
/// time control. See [`TimeControl`] for the fields consulted.
#[must_use]
pub fn search_budget_ms(control: &TimeControl) -> u32 {
    let budget = if let Some(movetime) = control.movetime {
        (i64::from(movetime) - BUFFER_MS).max(MIN_BUDGET_MS)
    } else if let Some(my_time) = control.my_time {
        let my_time = i64::from(my_time);
        let my_inc = i64::from(control.my_inc);
        let moves_remaining = match control.movestogo {
            Some(n) if n > 0 && n < MOVESTOGO_RANGE_EXCLUSIVE_MAX => i64::from(n),
            _ => DEFAULT_MOVES_REMAINING,
        };
        let raw = my_time / moves_remaining + my_inc - BUFFER_MS;
        raw.min(my_time / 2 - BUFFER_MS).max(MIN_BUDGET_MS)
    } else {
        DEFAULT_BUDGET_MS - BUFFER_MS
    };

    budget.max(MIN_BUDGET_MS) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_takes_priority_and_subtracts_buffer() {
        let control = TimeControl {
            movetime: Some(1000),
            ..Default::default()
        };
        assert_eq!(search_budget_ms(&control), 900);
    }

    #[test]
    fn movetime_floors_at_minimum() {
        let control = TimeControl {
            movetime: Some(5),
            ..Default::default()
        };
        assert_eq!(search_budget_ms(&control), 10);
    }

    #[test]
    fn default_movestogo_is_35_when_out_of_range() {
        let control = TimeControl {
            my_time: Some(60_000),
            movestogo: Some(0),
            ..Default::default()
        };
        assert_eq!(search_budget_ms(&control), 60_000 / 35 - 100);
    }

    #[test]
    fn remaining_time_budget_is_capped_at_half() {
        let control = TimeControl {
            my_time: Some(100),
            my_inc: 0,
            movestogo: Some(1),
            ..Default::default()
        };
        // (100 / 1) - 100 = 0, floored to 10; half-cap of (100/2 - 100) = -50
        // would be even lower, so the floor wins.
        assert_eq!(search_budget_ms(&control), 10);
    }

    #[test]
    fn no_time_info_uses_default_budget() {
        assert_eq!(search_budget_ms(&TimeControl::default()), 1900);
    }
}
