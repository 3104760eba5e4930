//! Shared fixtures: a small domain model and its wire messages.

#![allow(dead_code)]

use neocodec::Codec;
use neocodec::Conversion;
use neocodec::WireMessage;
use neopack::Decoder;
use neopack::Encoder;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountMsg {
    pub id: String,
}

impl WireMessage for AccountMsg {
    fn pack(&self, enc: &mut Encoder) -> neopack::Result<()> {
        enc.map_begin()?;
        enc.variant_begin("id")?;
        enc.str(&self.id)?;
        enc.variant_end()?;
        enc.map_end()
    }

    fn unpack(dec: &mut Decoder<'_>) -> neopack::Result<Self> {
        let mut map = dec.map()?;
        let mut id = None;
        while let Some((key, mut value)) = map.next()? {
            match key {
                "id" => id = Some(value.str()?.to_string()),
                _ => value.skip()?,
            }
        }
        Ok(AccountMsg { id: id.unwrap_or_default() })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sensor: String,
    pub celsius: f64,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingMsg {
    pub sensor: String,
    pub millis_celsius: i64,
    pub seq: u64,
}

impl WireMessage for ReadingMsg {
    fn pack(&self, enc: &mut Encoder) -> neopack::Result<()> {
        enc.list_begin()?;
        enc.str(&self.sensor)?;
        enc.s64(self.millis_celsius)?;
        enc.u64(self.seq)?;
        enc.list_end()
    }

    fn unpack(dec: &mut Decoder<'_>) -> neopack::Result<Self> {
        let mut items = dec.list()?;
        let mut next = || items.next().ok_or(neopack::Error::UnexpectedEnd);
        let sensor = next()?.str()?.to_string();
        let millis_celsius = next()?.s64()?;
        let seq = next()?.u64()?;
        Ok(ReadingMsg { sensor, millis_celsius, seq })
    }
}

/// Only ever has an encoder registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Foo(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct FooMsg(pub u32);

impl WireMessage for FooMsg {
    fn pack(&self, enc: &mut Encoder) -> neopack::Result<()> {
        enc.u32(self.0)
    }

    fn unpack(dec: &mut Decoder<'_>) -> neopack::Result<Self> {
        Ok(FooMsg(dec.u32()?))
    }
}

/// A wire type nobody registers.
#[derive(Debug, Clone, PartialEq)]
pub struct BarMsg;

impl WireMessage for BarMsg {
    fn pack(&self, enc: &mut Encoder) -> neopack::Result<()> {
        enc.unit()
    }

    fn unpack(dec: &mut Decoder<'_>) -> neopack::Result<Self> {
        dec.unit()?;
        Ok(BarMsg)
    }
}

/// A codec with the account and reading pairs, accounts registered behind a `Box`.
pub fn domain_codec() -> Codec {
    let codec = Codec::new();
    codec
        .register(
            Conversion::encoder(|a: Box<Account>| AccountMsg { id: a.id }),
            Conversion::decoder(|m: AccountMsg| Box::new(Account { id: m.id })),
        )
        .register(
            Conversion::encoder(|r: Reading| ReadingMsg {
                sensor: r.sensor,
                millis_celsius: (r.celsius * 1000.0).round() as i64,
                seq: r.seq,
            }),
            Conversion::decoder(|m: ReadingMsg| Reading {
                sensor: m.sensor,
                celsius: m.millis_celsius as f64 / 1000.0,
                seq: m.seq,
            }),
        );
    codec
}
