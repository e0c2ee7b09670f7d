//! Formatting utilities used for CLI outputs.

/// 1500000 → "1.500.000", -15000 → "-15.000"
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }

    if amount < 0 {
        format!("-{out}")
    } else {
        out
    }
}

pub fn mins2readable(mins: i64, want_sign: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    format!("{}{:02}h {:02}m", sign, hours, minutes)
}
