mod polygon;
mod series;
mod utils;
