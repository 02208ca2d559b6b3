pub mod scorer;
pub mod trend_windower;
