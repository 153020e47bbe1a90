//! DNS Provider 实现

mod zoneeu;

pub use zoneeu::{
    CreateTxtRecordRequest, TxtRecord, TxtRecordListResponse, ZoneEuProvider, find_record_id,
};
