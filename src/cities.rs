//! Reference list of the world's major cities, used for the point map.

use geo::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: &'static str,
    /// (longitude, latitude) in degrees.
    pub location: Point<f64>,
    pub population_millions: f64,
    pub country: &'static str,
}

impl City {
    #[inline] pub fn longitude(&self) -> f64 { self.location.x() }

    #[inline] pub fn latitude(&self) -> f64 { self.location.y() }
}

// (name, latitude, longitude, population in millions, country)
const MAJOR_CITIES: &[(&str, f64, f64, f64, &str)] = &[
    ("Tokyo", 35.6762, 139.6503, 37.4, "Japan"),
    ("Delhi", 28.7041, 77.1025, 32.9, "India"),
    ("Shanghai", 31.2304, 121.4737, 28.5, "China"),
    ("São Paulo", -23.5505, -46.6333, 22.6, "Brazil"),
    ("Mumbai", 19.0760, 72.8777, 20.7, "India"),
    ("Beijing", 39.9042, 116.4074, 20.5, "China"),
    ("Cairo", 30.0444, 31.2357, 21.3, "Egypt"),
    ("Dhaka", 23.8103, 90.4125, 22.0, "Bangladesh"),
    ("Mexico City", 19.4326, -99.1332, 21.9, "Mexico"),
    ("Osaka", 34.6937, 135.5023, 19.1, "Japan"),
    ("Karachi", 24.8607, 67.0011, 16.8, "Pakistan"),
    ("Chongqing", 29.4316, 106.9123, 16.4, "China"),
    ("Istanbul", 41.0082, 28.9784, 15.6, "Turkey"),
    ("Buenos Aires", -34.6037, -58.3816, 15.4, "Argentina"),
    ("Kolkata", 22.5726, 88.3639, 15.1, "India"),
    ("Lagos", 6.5244, 3.3792, 14.9, "Nigeria"),
    ("Manila", 14.5995, 120.9842, 14.4, "Philippines"),
    ("Rio de Janeiro", -22.9068, -43.1729, 13.7, "Brazil"),
    ("Guangzhou", 23.1291, 113.2644, 13.6, "China"),
    ("Los Angeles", 34.0522, -118.2437, 13.2, "USA"),
    ("Moscow", 55.7558, 37.6173, 12.6, "Russia"),
    ("Paris", 48.8566, 2.3522, 11.2, "France"),
    ("Bangkok", 13.7563, 100.5018, 10.9, "Thailand"),
    ("Jakarta", -6.2088, 106.8456, 10.8, "Indonesia"),
    ("London", 51.5074, -0.1278, 9.5, "UK"),
    ("Lima", -12.0464, -77.0428, 11.2, "Peru"),
    ("Seoul", 37.5665, 126.9780, 9.9, "South Korea"),
    ("Bogotá", 4.7110, -74.0721, 11.3, "Colombia"),
    ("Chennai", 13.0827, 80.2707, 11.5, "India"),
    ("Bangalore", 12.9716, 77.5946, 12.8, "India"),
];

/// The 30 major cities shown on the point map.
pub fn major_cities() -> Vec<City> {
    MAJOR_CITIES.iter()
        .map(|&(name, lat, lon, population_millions, country)| City {
            name,
            location: Point::new(lon, lat),
            population_millions,
            country,
        })
        .collect()
}
