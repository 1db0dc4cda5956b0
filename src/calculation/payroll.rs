//! Monthly payroll aggregation.
//!
//! Pay is derived from `completed` schedules only. Each schedule contributes
//! its worked hours at the employee's hourly rate plus a night premium of
//! [`NIGHT_PREMIUM_RATE`] on the hours inside the 22:30-06:30 window.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, MonthComparison, MonthlyPayroll, PayrollLine, PayrollMonth, ScheduleRequest,
    ScheduleStatus, ShiftDefinition,
};

use super::time_interval::{duration_hours, night_premium_hours};

/// Night premium as a fraction of the hourly rate (30%).
pub const NIGHT_PREMIUM_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Computes one employee's pay for a month.
///
/// An employee without completed schedules in the month gets a zero-valued
/// line. Fails only if a counted schedule references an unknown shift.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
/// use shift_engine::calculation::compute_employee_payroll;
/// use shift_engine::models::{
///     Employee, PayrollMonth, ScheduleRequest, ScheduleStatus, ShiftCategory, ShiftDefinition,
/// };
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Kim".to_string(),
///     hourly_rate: Decimal::new(35000, 0),
///     store_id: None,
/// };
/// let night = ShiftDefinition {
///     id: "night".to_string(),
///     name: "Night".to_string(),
///     start_time: "22:30".parse().unwrap(),
///     end_time: "06:30".parse().unwrap(),
///     duration: None,
///     category: ShiftCategory::FullTime,
///     is_active: true,
///     capacity: None,
/// };
/// let worked = ScheduleRequest {
///     id: "sch_001".to_string(),
///     store_id: "store_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     shift_id: "night".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     status: ScheduleStatus::Completed,
///     start_time: None,
///     end_time: None,
///     requested_by: "emp_001".to_string(),
///     created_by: "emp_001".to_string(),
///     assigned_by: None,
///     approved_by: None,
///     created_at: Utc::now(),
///     updated_at: None,
/// };
///
/// let month = PayrollMonth::new(2026, 3).unwrap();
/// let line = compute_employee_payroll(&employee, &[worked], &[night], month).unwrap();
/// assert_eq!(line.total_hours, Decimal::new(8, 0));
/// assert_eq!(line.night_shift_hours, Decimal::new(8, 0));
/// assert_eq!(line.night_shift_allowance, Decimal::new(84000, 0));
/// assert_eq!(line.total_salary, Decimal::new(364000, 0));
/// ```
pub fn compute_employee_payroll(
    employee: &Employee,
    schedules: &[ScheduleRequest],
    shifts: &[ShiftDefinition],
    month: PayrollMonth,
) -> EngineResult<PayrollLine> {
    let first_day = month.first_day()?;
    let last_day = month.last_day()?;

    let mut completed_shifts = 0u32;
    let mut total_hours = Decimal::ZERO;
    let mut night_shift_hours = Decimal::ZERO;

    for schedule in schedules.iter().filter(|s| {
        s.employee_id == employee.id
            && s.status == ScheduleStatus::Completed
            && s.date >= first_day
            && s.date <= last_day
    }) {
        let range = schedule.resolve_range(shifts)?;
        completed_shifts += 1;
        total_hours = checked(total_hours.checked_add(duration_hours(&range)), "total hours")?;
        night_shift_hours = checked(
            night_shift_hours.checked_add(night_premium_hours(&range)),
            "night shift hours",
        )?;
    }

    let night_shift_allowance = checked(
        night_shift_hours
            .checked_mul(employee.hourly_rate)
            .and_then(|pay| pay.checked_mul(NIGHT_PREMIUM_RATE)),
        "night shift allowance",
    )?;
    let total_salary = checked(
        total_hours
            .checked_mul(employee.hourly_rate)
            .and_then(|base| base.checked_add(night_shift_allowance)),
        "total salary",
    )?;

    debug!(
        employee_id = %employee.id,
        %month,
        completed_shifts,
        total_hours = %total_hours,
        night_shift_hours = %night_shift_hours,
        total_salary = %total_salary,
        "Computed employee payroll"
    );

    Ok(PayrollLine {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        hourly_rate: employee.hourly_rate,
        completed_shifts,
        total_hours,
        night_shift_hours,
        night_shift_allowance,
        total_salary,
    })
}

/// Computes payroll for a whole roster and sums store-wide totals.
pub fn compute_monthly_payroll(
    employees: &[Employee],
    schedules: &[ScheduleRequest],
    shifts: &[ShiftDefinition],
    month: PayrollMonth,
) -> EngineResult<MonthlyPayroll> {
    let lines = employees
        .iter()
        .map(|employee| compute_employee_payroll(employee, schedules, shifts, month))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(MonthlyPayroll {
        month,
        total_employees: lines.len() as u32,
        total_completed_shifts: lines.iter().map(|l| l.completed_shifts).sum(),
        total_hours: checked_sum(lines.iter().map(|l| l.total_hours), "store total hours")?,
        total_night_shift_hours: checked_sum(
            lines.iter().map(|l| l.night_shift_hours),
            "store night shift hours",
        )?,
        total_night_shift_allowance: checked_sum(
            lines.iter().map(|l| l.night_shift_allowance),
            "store night shift allowance",
        )?,
        total_salary: checked_sum(lines.iter().map(|l| l.total_salary), "store total salary")?,
        lines,
    })
}

/// Unwraps a checked decimal operation, naming it on overflow.
fn checked(value: Option<Decimal>, operation: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::ArithmeticOverflow {
        operation: operation.to_string(),
    })
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, operation: &str) -> EngineResult<Decimal> {
    values.try_fold(Decimal::ZERO, |total, value| {
        checked(total.checked_add(value), operation)
    })
}

/// Percent change from `previous` to `current`, rounded to one decimal.
///
/// Zero when `previous` is zero.
fn percent_change(current: Decimal, previous: Decimal, operation: &str) -> EngineResult<Decimal> {
    if previous.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = current
        .checked_sub(previous)
        .and_then(|change| change.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    Ok(checked(ratio, operation)?.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// Compares two months of payroll.
///
/// Fails with [`EngineError::ArithmeticOverflow`] when a change does not fit
/// in a decimal.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use shift_engine::calculation::compare_months;
/// use shift_engine::models::{MonthlyPayroll, PayrollMonth};
///
/// let month = |m, salary: i64, hours: i64| MonthlyPayroll {
///     month: PayrollMonth::new(2026, m).unwrap(),
///     lines: vec![],
///     total_employees: 0,
///     total_completed_shifts: 0,
///     total_hours: Decimal::new(hours, 0),
///     total_night_shift_hours: Decimal::ZERO,
///     total_night_shift_allowance: Decimal::ZERO,
///     total_salary: Decimal::new(salary, 0),
/// };
///
/// let comparison = compare_months(&month(3, 1_200_000, 120), &month(2, 1_000_000, 100)).unwrap();
/// assert_eq!(comparison.salary_change, Decimal::new(200_000, 0));
/// assert_eq!(comparison.salary_change_percent, Decimal::new(20, 0));
/// assert_eq!(comparison.hours_change_percent, Decimal::new(20, 0));
/// ```
pub fn compare_months(
    current: &MonthlyPayroll,
    previous: &MonthlyPayroll,
) -> EngineResult<MonthComparison> {
    Ok(MonthComparison {
        salary_change: checked(
            current.total_salary.checked_sub(previous.total_salary),
            "salary change",
        )?,
        salary_change_percent: percent_change(
            current.total_salary,
            previous.total_salary,
            "salary change percent",
        )?,
        hours_change: checked(
            current.total_hours.checked_sub(previous.total_hours),
            "hours change",
        )?,
        hours_change_percent: percent_change(
            current.total_hours,
            previous.total_hours,
            "hours change percent",
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftCategory;
    use chrono::{DateTime, NaiveDate, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_employee(id: &str, rate: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_string(),
            hourly_rate: dec(rate),
            store_id: Some("store_001".to_string()),
        }
    }

    fn make_shift(id: &str, start: &str, end: &str, category: ShiftCategory) -> ShiftDefinition {
        ShiftDefinition {
            id: id.to_string(),
            name: id.to_string(),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            duration: None,
            category,
            is_active: true,
            capacity: None,
        }
    }

    fn catalog() -> Vec<ShiftDefinition> {
        vec![
            make_shift("day", "09:00", "18:00", ShiftCategory::FullTime),
            make_shift("night", "22:30", "06:30", ShiftCategory::FullTime),
            make_shift("flex", "09:00", "22:00", ShiftCategory::PartTime),
        ]
    }

    fn make_schedule(
        id: &str,
        employee_id: &str,
        shift_id: &str,
        date: &str,
        status: ScheduleStatus,
    ) -> ScheduleRequest {
        ScheduleRequest {
            id: id.to_string(),
            store_id: "store_001".to_string(),
            employee_id: employee_id.to_string(),
            shift_id: shift_id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status,
            start_time: None,
            end_time: None,
            requested_by: employee_id.to_string(),
            created_by: employee_id.to_string(),
            assigned_by: None,
            approved_by: None,
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn march() -> PayrollMonth {
        PayrollMonth::new(2026, 3).unwrap()
    }

    #[test]
    fn test_night_shift_end_to_end() {
        let employee = make_employee("emp_001", "35000");
        let schedules = vec![make_schedule("s1", "emp_001", "night", "2026-03-10", ScheduleStatus::Completed)];

        let line = compute_employee_payroll(&employee, &schedules, &catalog(), march()).unwrap();

        assert_eq!(line.completed_shifts, 1);
        assert_eq!(line.total_hours, dec("8.0"));
        assert_eq!(line.night_shift_hours, dec("8.0"));
        assert_eq!(line.night_shift_allowance, dec("84000"));
        assert_eq!(line.total_salary, dec("364000"));
    }

    #[test]
    fn test_no_completed_schedules_is_zero_line() {
        let employee = make_employee("emp_001", "35000");
        let schedules = vec![
            make_schedule("s1", "emp_001", "day", "2026-03-10", ScheduleStatus::Approved),
            make_schedule("s2", "emp_001", "day", "2026-03-11", ScheduleStatus::Pending),
            make_schedule("s3", "emp_001", "day", "2026-03-12", ScheduleStatus::Rejected),
        ];

        let line = compute_employee_payroll(&employee, &schedules, &catalog(), march()).unwrap();

        assert_eq!(line.completed_shifts, 0);
        assert_eq!(line.total_hours, Decimal::ZERO);
        assert_eq!(line.total_salary, Decimal::ZERO);
    }

    #[test]
    fn test_month_boundaries_are_inclusive() {
        let employee = make_employee("emp_001", "10000");
        let schedules = vec![
            make_schedule("feb", "emp_001", "day", "2026-02-28", ScheduleStatus::Completed),
            make_schedule("first", "emp_001", "day", "2026-03-01", ScheduleStatus::Completed),
            make_schedule("last", "emp_001", "day", "2026-03-31", ScheduleStatus::Completed),
            make_schedule("apr", "emp_001", "day", "2026-04-01", ScheduleStatus::Completed),
        ];

        let line = compute_employee_payroll(&employee, &schedules, &catalog(), march()).unwrap();

        assert_eq!(line.completed_shifts, 2);
        assert_eq!(line.total_hours, dec("18.0"));
        assert_eq!(line.total_salary, dec("180000"));
    }

    #[test]
    fn test_custom_flex_range_is_paid() {
        let employee = make_employee("emp_001", "10000");
        let mut schedule = make_schedule("s1", "emp_001", "flex", "2026-03-10", ScheduleStatus::Completed);
        schedule.start_time = Some("18:00".parse().unwrap());
        schedule.end_time = Some("23:30".parse().unwrap());

        let line = compute_employee_payroll(&employee, &[schedule], &catalog(), march()).unwrap();

        assert_eq!(line.total_hours, dec("5.5"));
        assert_eq!(line.night_shift_hours, dec("1.0"));
        assert_eq!(line.night_shift_allowance, dec("3000"));
        assert_eq!(line.total_salary, dec("58000"));
    }

    #[test]
    fn test_unknown_shift_on_completed_schedule_fails() {
        let employee = make_employee("emp_001", "10000");
        let schedules = vec![make_schedule("s1", "emp_001", "gone", "2026-03-10", ScheduleStatus::Completed)];

        let err = compute_employee_payroll(&employee, &schedules, &catalog(), march()).unwrap_err();
        assert!(matches!(err, EngineError::ShiftNotFound { .. }));
    }

    #[test]
    fn test_monthly_totals_sum_lines() {
        let employees = vec![
            make_employee("emp_001", "35000"),
            make_employee("emp_002", "10000"),
            make_employee("emp_003", "12000"),
        ];
        let schedules = vec![
            make_schedule("s1", "emp_001", "night", "2026-03-10", ScheduleStatus::Completed),
            make_schedule("s2", "emp_002", "day", "2026-03-10", ScheduleStatus::Completed),
            make_schedule("s3", "emp_002", "day", "2026-03-11", ScheduleStatus::Completed),
        ];

        let payroll = compute_monthly_payroll(&employees, &schedules, &catalog(), march()).unwrap();

        assert_eq!(payroll.total_employees, 3);
        assert_eq!(payroll.lines.len(), 3);
        assert_eq!(payroll.total_completed_shifts, 3);
        assert_eq!(payroll.total_hours, dec("26.0"));
        assert_eq!(payroll.total_night_shift_hours, dec("8.0"));
        assert_eq!(payroll.total_night_shift_allowance, dec("84000"));
        // 364000 + 18h * 10000
        assert_eq!(payroll.total_salary, dec("544000"));
        assert_eq!(payroll.lines[2].total_salary, Decimal::ZERO);
    }

    #[test]
    fn test_empty_roster() {
        let payroll = compute_monthly_payroll(&[], &[], &[], march()).unwrap();
        assert_eq!(payroll.total_employees, 0);
        assert_eq!(payroll.total_salary, Decimal::ZERO);
    }

    fn totals(salary: &str, hours: &str) -> MonthlyPayroll {
        MonthlyPayroll {
            month: march(),
            lines: vec![],
            total_employees: 0,
            total_completed_shifts: 0,
            total_hours: dec(hours),
            total_night_shift_hours: Decimal::ZERO,
            total_night_shift_allowance: Decimal::ZERO,
            total_salary: dec(salary),
        }
    }

    #[test]
    fn test_compare_months_decrease() {
        let comparison = compare_months(&totals("900000", "90"), &totals("1200000", "120")).unwrap();
        assert_eq!(comparison.salary_change, dec("-300000"));
        assert_eq!(comparison.salary_change_percent, dec("-25.0"));
        assert_eq!(comparison.hours_change, dec("-30"));
        assert_eq!(comparison.hours_change_percent, dec("-25.0"));
    }

    #[test]
    fn test_compare_months_rounds_percent() {
        let comparison = compare_months(&totals("100", "10"), &totals("300", "30")).unwrap();
        assert_eq!(comparison.salary_change_percent, dec("-66.7"));
    }

    #[test]
    fn test_compare_against_empty_month_is_zero_percent() {
        let comparison = compare_months(&totals("500000", "40"), &totals("0", "0")).unwrap();
        assert_eq!(comparison.salary_change, dec("500000"));
        assert_eq!(comparison.salary_change_percent, Decimal::ZERO);
        assert_eq!(comparison.hours_change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_compare_extreme_totals_reports_overflow() {
        let err = compare_months(
            &totals("79228162514264337593543950335", "0"),
            &totals("0.5", "0"),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_compare_extreme_negative_change_reports_overflow() {
        let err = compare_months(
            &totals("-79228162514264337593543950335", "10"),
            &totals("79228162514264337593543950335", "10"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ArithmeticOverflow { ref operation } if operation == "salary change"
        ));
    }

    #[test]
    fn test_extreme_hourly_rate_reports_overflow() {
        let employee = make_employee("emp_001", "79228162514264337593543950335");
        let schedules = vec![make_schedule("s1", "emp_001", "night", "2026-03-10", ScheduleStatus::Completed)];

        let err = compute_employee_payroll(&employee, &schedules, &catalog(), march()).unwrap_err();
        assert!(matches!(err, EngineError::ArithmeticOverflow { .. }));
    }
}
