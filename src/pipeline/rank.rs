//! Ranking stage: order cities and assign dense ranks

use tracing::info;

use crate::models::CityStats;

/// Sort cities by total average temperature, then by total average
/// good-weather hours, both descending, and assign dense 1-based ranks.
///
/// The sort is stable, so cities equal on both keys keep their discovery
/// order. Ranks have no gaps and are never shared, even on exact ties.
#[must_use]
pub fn rank(mut cities: Vec<CityStats>) -> Vec<CityStats> {
    info!("Ranking {} cities", cities.len());

    cities.sort_by(|a, b| {
        b.total_average_temperature
            .total_cmp(&a.total_average_temperature)
            .then_with(|| {
                b.total_average_good_weather_hours
                    .total_cmp(&a.total_average_good_weather_hours)
            })
    });

    for (index, city) in cities.iter_mut().enumerate() {
        city.rank = Some(index as u32 + 1);
    }

    cities
}

/// Name of the top-ranked city, if any survived the earlier stages
#[must_use]
pub fn best_city(ranked: &[CityStats]) -> Option<&str> {
    ranked.first().map(|city| city.city_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(city: &str, temperature: f64, good_hours: f64) -> CityStats {
        CityStats {
            city_name: city.to_string(),
            days: Vec::new(),
            total_average_temperature: temperature,
            total_average_good_weather_hours: good_hours,
            rank: None,
        }
    }

    #[test]
    fn test_higher_temperature_ranks_first() {
        let ranked = rank(vec![
            stats("MOSCOW", 9.7, 1.6),
            stats("BEIJING", 25.0, 7.8),
            stats("PARIS", 11.4, 6.2),
        ]);

        let names: Vec<_> = ranked.iter().map(|c| c.city_name.as_str()).collect();
        assert_eq!(names, ["BEIJING", "PARIS", "MOSCOW"]);
        let ranks: Vec<_> = ranked.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, [Some(1), Some(2), Some(3)]);
        assert_eq!(best_city(&ranked), Some("BEIJING"));
    }

    #[test]
    fn test_good_weather_hours_break_temperature_ties() {
        let ranked = rank(vec![
            stats("LONDON", 15.0, 2.0),
            stats("BERLIN", 15.0, 5.0),
        ]);

        assert_eq!(ranked[0].city_name, "BERLIN");
        assert_eq!(ranked[1].city_name, "LONDON");
    }

    #[test]
    fn test_exact_ties_keep_discovery_order_with_dense_ranks() {
        let ranked = rank(vec![
            stats("ROMA", 20.0, 4.0),
            stats("CAIRO", 20.0, 4.0),
            stats("WARSZAWA", 20.0, 4.0),
        ]);

        let names: Vec<_> = ranked.iter().map(|c| c.city_name.as_str()).collect();
        assert_eq!(names, ["ROMA", "CAIRO", "WARSZAWA"]);
        let ranks: Vec<_> = ranked.iter().map(|c| c.rank.unwrap()).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn test_best_city_of_empty_input() {
        assert_eq!(best_city(&[]), None);
        assert!(rank(Vec::new()).is_empty());
    }
}
