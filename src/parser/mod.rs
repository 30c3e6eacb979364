pub mod offers_json;

pub use offers_json::{OffersJsonParser, Parser};
