pub mod location_dto;

pub use location_dto::{
    CityListQuery, CityResponseDto, CountryListQuery, CountryResponseDto, StateListQuery,
    StateResponseDto,
};
