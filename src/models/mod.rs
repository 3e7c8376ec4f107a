mod flight;
pub mod price_update;
pub mod search;
pub mod tracking;

pub use flight::{FlightFilter, FlightKey, FlightProjection, FlightRecord, PriceObservation, RankedResult};
pub use price_update::{UpdatePriceRequest, UpdatePriceResponse};
pub use search::{RankPreferences, SearchQuery};
pub use tracking::{
    BestDealRequest, BestDealResponse, BestDealSource, TrackPricesRequest, TrackQuery, TrackRequest,
    TrackResponse,
};
