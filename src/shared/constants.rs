/// Page size of the public event listing
pub const EVENT_PAGE_SIZE: i64 = 15;
