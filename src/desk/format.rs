//! 纯展示派生函数
//!
//! SLA 分级、相对时间、日期和证件/电话掩码。全部是无副作用的全函数，
//! 不读系统时钟，当前时间由调用方传入，单测可以完全确定。

use crate::desk::types::{SlaStatus, SLA_WARNING_WINDOW_HOURS};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// SLA 分级：已过期 critical，不足预警窗口（2 小时）warning，否则 ok
///
/// 边界：恰好还剩 2 小时归 ok（warning 的上界是开区间）。
pub fn sla_status(deadline: DateTime<Utc>, now: DateTime<Utc>) -> SlaStatus {
    let diff = deadline - now;
    if diff < Duration::zero() {
        SlaStatus::Critical
    } else if diff < Duration::hours(SLA_WARNING_WINDOW_HOURS) {
        SlaStatus::Warning
    } else {
        SlaStatus::Ok
    }
}

/// SLA 剩余时间短文案
///
/// 已过期固定返回 "Vencido"；否则 `{h}h {m}min`，不足 1 小时只给 `{m}min`。
/// 小时和分钟都向下取整，分钟是取完小时后的余数。
pub fn format_sla_time(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = deadline - now;
    if diff < Duration::zero() {
        return "Vencido".to_string();
    }

    let hours = diff.num_hours();
    let minutes = diff.num_minutes() - hours * 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}

/// "dd/MM/yyyy às HH:mm"
pub fn format_date_time(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y às %H:%M").to_string()
}

/// "dd/MM/yyyy"
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "HH:mm"
pub fn format_time(date: DateTime<Utc>) -> String {
    date.format("%H:%M").to_string()
}

/// 巴西手机/座机掩码
///
/// 去掉所有非数字后：11 位 → `+55 DD NNNNN-NNNN`，10 位 → `+55 DD NNNN-NNNN`，
/// 其余长度原样返回。
pub fn format_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match cleaned.len() {
        11 => format!("+55 {} {}-{}", &cleaned[..2], &cleaned[2..7], &cleaned[7..]),
        10 => format!("+55 {} {}-{}", &cleaned[..2], &cleaned[2..6], &cleaned[6..]),
        _ => phone.to_string(),
    }
}

/// CPF/CNPJ 掩码：11 位 → `NNN.NNN.NNN-NN`，14 位 → `NN.NNN.NNN/NNNN-NN`，
/// 其余长度原样返回
pub fn format_document(document: &str) -> String {
    let cleaned: String = document.chars().filter(|c| c.is_ascii_digit()).collect();

    match cleaned.len() {
        11 => format!(
            "{}.{}.{}-{}",
            &cleaned[..3],
            &cleaned[3..6],
            &cleaned[6..9],
            &cleaned[9..]
        ),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &cleaned[..2],
            &cleaned[2..5],
            &cleaned[5..8],
            &cleaned[8..12],
            &cleaned[12..]
        ),
        _ => document.to_string(),
    }
}

/// 葡语人类可读相对时间，带前后缀（过去 "há …"，将来 "em …"）
///
/// 分桶规则与 date-fns 的 formatDistance 对齐：按分钟数（秒数四舍五入）
/// 落入 分钟/小时/天/月/年 档位，月以上按完整日历月数换算年。
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let is_future = date > now;
    let seconds = (date - now).num_seconds().abs();
    let minutes = round_div(seconds, 60);

    let phrase = if minutes < 2 {
        if minutes == 0 {
            "menos de um minuto".to_string()
        } else {
            plural(minutes, "1 minuto", "minutos")
        }
    } else if minutes < 45 {
        plural(minutes, "1 minuto", "minutos")
    } else if minutes < 90 {
        "cerca de 1 hora".to_string()
    } else if minutes < MINUTES_IN_DAY {
        about_plural(round_div(minutes, 60), "cerca de 1 hora", "horas")
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        "1 dia".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        plural(round_div(minutes, MINUTES_IN_DAY), "1 dia", "dias")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        about_plural(round_div(minutes, MINUTES_IN_MONTH), "cerca de 1 mês", "meses")
    } else {
        let months = full_months_between(date.min(now), date.max(now));
        if months < 12 {
            plural(round_div(minutes, MINUTES_IN_MONTH), "1 mês", "meses")
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => about_plural(years, "cerca de 1 ano", "anos"),
                3..=8 => {
                    if years == 1 {
                        "mais de 1 ano".to_string()
                    } else {
                        format!("mais de {} anos", years)
                    }
                }
                _ => {
                    if years + 1 == 1 {
                        "quase 1 ano".to_string()
                    } else {
                        format!("quase {} anos", years + 1)
                    }
                }
            }
        }
    };

    if is_future {
        format!("em {}", phrase)
    } else {
        format!("há {}", phrase)
    }
}

fn plural(count: i64, one: &str, unit: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        format!("{} {}", count, unit)
    }
}

fn about_plural(count: i64, one: &str, unit: &str) -> String {
    if count == 1 {
        one.to_string()
    } else {
        format!("cerca de {} {}", count, unit)
    }
}

fn round_div(value: i64, divisor: i64) -> i64 {
    (value as f64 / divisor as f64).round() as i64
}

/// 两个时间点之间的完整日历月数（earlier <= later）
fn full_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);
    if months <= 0 {
        return 0;
    }
    // 末月未满完整一个月则不计入
    let later_in_month = (later.day(), later.hour(), later.minute(), later.second());
    let earlier_in_month = (
        earlier.day(),
        earlier.hour(),
        earlier.minute(),
        earlier.second(),
    );
    if later_in_month < earlier_in_month {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn sla_overdue_is_critical() {
        let now = base_now();
        assert_eq!(sla_status(now - Duration::minutes(1), now), SlaStatus::Critical);
        assert_eq!(sla_status(now - Duration::days(30), now), SlaStatus::Critical);
    }

    #[test]
    fn sla_inside_warning_window() {
        let now = base_now();
        assert_eq!(sla_status(now, now), SlaStatus::Warning);
        assert_eq!(sla_status(now + Duration::minutes(30), now), SlaStatus::Warning);
        assert_eq!(
            sla_status(now + Duration::hours(2) - Duration::seconds(1), now),
            SlaStatus::Warning
        );
    }

    #[test]
    fn sla_two_hour_boundary_is_ok() {
        let now = base_now();
        // 恰好 2 小时归 ok
        assert_eq!(sla_status(now + Duration::hours(2), now), SlaStatus::Ok);
        assert_eq!(sla_status(now + Duration::days(1), now), SlaStatus::Ok);
    }

    #[test]
    fn sla_time_overdue_label_is_fixed() {
        let now = base_now();
        assert_eq!(format_sla_time(now - Duration::minutes(5), now), "Vencido");
        assert_eq!(format_sla_time(now - Duration::days(90), now), "Vencido");
    }

    #[test]
    fn sla_time_floors_hours_and_minutes() {
        let now = base_now();
        assert_eq!(
            format_sla_time(now + Duration::minutes(90), now),
            "1h 30min"
        );
        assert_eq!(format_sla_time(now + Duration::minutes(45), now), "45min");
        assert_eq!(format_sla_time(now + Duration::hours(2), now), "2h 0min");
        // 分钟是取完小时后的余数，不是总分钟数
        assert_eq!(
            format_sla_time(now + Duration::minutes(125), now),
            "2h 5min"
        );
    }

    #[test]
    fn phone_eleven_digits() {
        assert_eq!(format_phone("11999991234"), "+55 11 99999-1234");
    }

    #[test]
    fn phone_ten_digits() {
        assert_eq!(format_phone("1134567890"), "+55 11 3456-7890");
    }

    #[test]
    fn phone_other_lengths_unchanged() {
        assert_eq!(format_phone("4567890"), "4567890");
        // 带国家码的已格式化号码清洗后是 13 位，原样返回
        assert_eq!(format_phone("+55 11 99999-1234"), "+55 11 99999-1234");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn document_cpf_and_cnpj_masks() {
        assert_eq!(format_document("12345678900"), "123.456.789-00");
        assert_eq!(format_document("12345678000199"), "12.345.678/0001-99");
        assert_eq!(format_document("123"), "123");
        // 已带掩码的 CPF 清洗后仍是 11 位，重新格式化
        assert_eq!(format_document("123.456.789-00"), "123.456.789-00");
    }

    #[test]
    fn date_rendering_is_pt_br() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date_time(t), "15/01/2024 às 10:30");
        assert_eq!(format_date(t), "15/01/2024");
        assert_eq!(format_time(t), "10:30");
    }

    #[test]
    fn relative_time_minutes() {
        let now = base_now();
        assert_eq!(
            format_relative_time(now - Duration::seconds(10), now),
            "há menos de um minuto"
        );
        assert_eq!(
            format_relative_time(now - Duration::seconds(30), now),
            "há 1 minuto"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(5), now),
            "há 5 minutos"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(44), now),
            "há 44 minutos"
        );
    }

    #[test]
    fn relative_time_hours() {
        let now = base_now();
        assert_eq!(
            format_relative_time(now - Duration::minutes(45), now),
            "há cerca de 1 hora"
        );
        assert_eq!(
            format_relative_time(now - Duration::minutes(90), now),
            "há cerca de 2 horas"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(5), now),
            "há cerca de 5 horas"
        );
    }

    #[test]
    fn relative_time_days_and_months() {
        let now = base_now();
        assert_eq!(
            format_relative_time(now - Duration::hours(30), now),
            "há 1 dia"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(3), now),
            "há 3 dias"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(45), now),
            "há cerca de 2 meses"
        );
    }

    #[test]
    fn relative_time_years() {
        let now = base_now();
        let past = Utc.with_ymd_and_hms(2020, 1, 10, 12, 0, 0).unwrap();
        // 48 个完整月 → 4 年整
        assert_eq!(format_relative_time(past, now), "há cerca de 4 anos");

        let past = Utc.with_ymd_and_hms(2022, 6, 10, 12, 0, 0).unwrap();
        // 19 个完整月 → 1 年零 7 个月
        assert_eq!(format_relative_time(past, now), "há mais de 1 ano");

        let past = Utc.with_ymd_and_hms(2022, 3, 10, 12, 0, 0).unwrap();
        // 22 个完整月 → 接近 2 年
        assert_eq!(format_relative_time(past, now), "há quase 2 anos");
    }

    #[test]
    fn relative_time_future_uses_em_prefix() {
        let now = base_now();
        assert_eq!(
            format_relative_time(now + Duration::days(2), now),
            "em 2 dias"
        );
        assert_eq!(
            format_relative_time(now + Duration::minutes(10), now),
            "em 10 minutos"
        );
    }
}
