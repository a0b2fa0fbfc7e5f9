use chrono::TimeZone;
use chrono_tz::Tz;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use database_timezone::model::codec::Codec;
use database_timezone::model::date_codec::DateCodec;
use database_timezone::model::date_time_codec::DateTimeCodec;
use database_timezone::model::platform::MYSQL;
use database_timezone::model::registry::TimezoneContext;
use database_timezone::model::value::Value;

fn codecs(c: &mut Criterion) {
    let zones = TimezoneContext::new(Tz::America__Nassau, Tz::Europe__Berlin);
    let datetime = Value::DateTime(Tz::UTC.with_ymd_and_hms(2020, 11, 24, 21, 0, 0).unwrap());

    c.bench_function("datetime to_storage", |b| {
        b.iter(|| DateTimeCodec.to_storage(black_box(&datetime), &MYSQL, &zones))
    });
    c.bench_function("datetime to_application", |b| {
        b.iter(|| DateTimeCodec.to_application(black_box(Value::from("2020-11-24 16:00:00")), &MYSQL, &zones))
    });
    c.bench_function("date to_storage", |b| {
        b.iter(|| DateCodec.to_storage(black_box(&datetime), &MYSQL, &zones))
    });
    c.bench_function("date to_application", |b| {
        b.iter(|| DateCodec.to_application(black_box(Value::from("2020-11-24")), &MYSQL, &zones))
    });
}

criterion_group!(benches, codecs);
criterion_main!(benches);
