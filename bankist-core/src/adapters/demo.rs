//! Demo accounts seeded into the store at startup

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Movement};

pub const DEMO_JONAS_ID: Uuid = Uuid::from_u128(0x11111111_1111_1111_1111_111111111111);
pub const DEMO_JESSICA_ID: Uuid = Uuid::from_u128(0x22222222_2222_2222_2222_222222222222);

/// Generate the demo accounts
///
/// - "js" / 1111: EUR, pt-PT, 1.2% interest
/// - "jd" / 2222: USD, en-US, 1.5% interest
pub fn generate_demo_accounts() -> Result<Vec<Account>> {
    let jonas = Account::new(
        DEMO_JONAS_ID,
        "Jonas Schmedtmann",
        1111,
        Decimal::new(12, 1),
        "EUR",
        "pt-PT",
    )
    .with_movements(movements(&[
        (20000, 2, "2019-11-18T21:31:17.178Z"),
        (45523, 2, "2019-12-23T07:42:02.383Z"),
        (-3065, 1, "2020-01-28T09:15:04.904Z"),
        (25000, 0, "2020-04-01T10:17:24.185Z"),
        (-64221, 2, "2020-05-08T14:11:59.604Z"),
        (-1339, 1, "2021-11-11T17:01:17.194Z"),
        (7997, 2, "2021-11-13T17:36:17.929Z"),
        (1300, 0, "2021-11-14T10:51:36.790Z"),
    ])?);

    let jessica = Account::new(
        DEMO_JESSICA_ID,
        "Jessica Davis",
        2222,
        Decimal::new(15, 1),
        "USD",
        "en-US",
    )
    .with_movements(movements(&[
        (5000, 0, "2019-11-01T13:15:33.035Z"),
        (3400, 0, "2019-11-30T09:48:16.867Z"),
        (-150, 0, "2019-12-25T06:04:23.907Z"),
        (-790, 0, "2020-01-25T14:18:46.235Z"),
        (-3210, 0, "2020-02-05T16:33:06.386Z"),
        (-1000, 0, "2020-04-10T14:43:26.374Z"),
        (8500, 0, "2020-06-25T18:49:59.371Z"),
        (-30, 0, "2020-07-26T12:01:20.894Z"),
    ])?);

    Ok(vec![jonas, jessica])
}

/// (mantissa, scale, RFC 3339 timestamp)
fn movements(raw: &[(i64, u32, &str)]) -> Result<Vec<Movement>> {
    raw.iter()
        .map(|&(mantissa, scale, date)| {
            let date = date
                .parse::<DateTime<Utc>>()
                .map_err(|e| Error::validation(format!("bad demo date {}: {}", date, e)))?;
            Ok(Movement::new(Decimal::new(mantissa, scale), date))
        })
        .collect()
}
