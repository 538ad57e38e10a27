use tickler_rule::{ParseErrorKind, RuleError, parse_date};

pub enum Expected {
    Date(&'static str),
    NoRecurrence,
    Parse(ParseErrorKind),
    InvalidDate,
    Exhausted,
}

pub struct OccurrenceCase {
    pub name: &'static str,
    pub now: &'static str,
    pub anchor: &'static str,
    pub rule: &'static str,
    pub expected: Expected,
}

const fn case(
    name: &'static str,
    now: &'static str,
    anchor: &'static str,
    rule: &'static str,
    expected: Expected,
) -> OccurrenceCase {
    OccurrenceCase {
        name,
        now,
        anchor,
        rule,
        expected,
    }
}

pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    use Expected::{Date, Exhausted, InvalidDate, NoRecurrence, Parse};

    vec![
        case("yearly_basic", "20240301", "20240215", "y", Date("20250215")),
        case("yearly_many_years_behind", "20240126", "20000101", "y", Date("20250101")),
        case("yearly_leap_day", "20240301", "20200229", "y", Date("20250301")),
        case("yearly_future_anchor", "20240126", "20261231", "y", Date("20271231")),
        case("daily_basic", "20240105", "20240101", "d 3", Date("20240107")),
        case("daily_lands_on_now_steps_again", "20240104", "20240101", "d 3", Date("20240107")),
        case("daily_one", "20240126", "20240125", "d 1", Date("20240127")),
        case("daily_max_interval", "20240126", "20240101", "d 400", Date("20250204")),
        case("daily_crosses_leap_february", "20240227", "20240220", "d 7", Date("20240305")),
        case("daily_future_anchor", "20240126", "20240601", "d 5", Date("20240606")),
        case("weekly_single_day", "20240126", "20240101", "w 1", Date("20240129")),
        case("weekly_sunday_is_seven", "20240126", "20240101", "w 7", Date("20240128")),
        case("weekly_several_days", "20240126", "20240101", "w 1,4,5", Date("20240129")),
        case("weekly_future_anchor", "20240126", "20240610", "w 3", Date("20240612")),
        case("monthly_last_day_leap", "20240201", "20240115", "m -1", Date("20240229")),
        case("monthly_last_day_common", "20230201", "20230115", "m -1", Date("20230228")),
        case("monthly_second_to_last", "20240201", "20240115", "m -2", Date("20240228")),
        case("monthly_several_days", "20240126", "20240101", "m 1,15,25", Date("20240201")),
        case("monthly_with_months", "20240126", "20240101", "m 3 1,3,5", Date("20240303")),
        case("monthly_thirty_first", "20240401", "20240101", "m 31", Date("20240531")),
        case("monthly_future_anchor", "20240126", "20241101", "m 1", Date("20241101")),
        case("monthly_day_31_in_february", "20240315", "20240101", "m 31 2", Exhausted),
        case("monthly_day_31_in_april", "20240101", "20240101", "m 31 4", Exhausted),
        case("blank_rule", "20240126", "20240101", "", NoRecurrence),
        case("unknown_kind", "20240126", "20240101", "x 5", Parse(ParseErrorKind::UnknownKind)),
        case("daily_missing_interval", "20240126", "20240101", "d", Parse(ParseErrorKind::MissingParameter)),
        case("daily_too_large", "20240126", "20240101", "d 401", Parse(ParseErrorKind::OutOfRange)),
        case("daily_zero", "20240126", "20240101", "d 0", Parse(ParseErrorKind::OutOfRange)),
        case("weekly_eight", "20240126", "20240101", "w 8", Parse(ParseErrorKind::OutOfRange)),
        case("monthly_zero", "20240126", "20240101", "m 0", Parse(ParseErrorKind::OutOfRange)),
        case("monthly_bad_month", "20240126", "20240101", "m 1 13", Parse(ParseErrorKind::OutOfRange)),
        case("bad_anchor", "20240126", "2024-01-01", "d 1", InvalidDate),
        case("impossible_anchor", "20240126", "20230229", "y", InvalidDate),
    ]
}

pub fn assert_case(case: &OccurrenceCase) {
    let now = parse_date(case.now).expect("case reference date is valid");
    let actual = tickler_rule::next_date(now, case.anchor, case.rule);

    match (&case.expected, &actual) {
        (Expected::Date(date), Ok(Some(next))) => {
            assert_eq!(next, date, "case {}", case.name);
        }
        (Expected::NoRecurrence, Ok(None))
        | (Expected::InvalidDate, Err(RuleError::InvalidDateFormat(_)))
        | (Expected::Exhausted, Err(RuleError::SearchExhausted { .. })) => {}
        (Expected::Parse(kind), Err(RuleError::Parse(err))) => {
            assert_eq!(err.kind, *kind, "case {}", case.name);
        }
        _ => panic!("case {}: unexpected result {actual:?}", case.name),
    }
}
