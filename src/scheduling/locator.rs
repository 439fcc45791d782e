use std::cmp::Ordering;

use super::distance::{distance_km, Coordinates};

/// Anything the locator can rank.
pub trait Located {
    fn coordinates(&self) -> Option<Coordinates>;
}

#[derive(Clone, Debug)]
pub struct Ranked<T> {
    pub item: T,
    pub distance_km: Option<f64>,
}

/// Sorts every entry by distance from `origin`, nearest first. The sort is
/// stable, so ties keep their input order. Entries without usable
/// coordinates go last with no distance.
pub fn nearest_workshops<T: Located>(origin: Coordinates, items: Vec<T>) -> Vec<Ranked<T>> {
    let mut ranked: Vec<Ranked<T>> = items
        .into_iter()
        .map(|item| {
            let distance_km = item.coordinates().map(|c| distance_km(origin, c));
            Ranked { item, distance_km }
        })
        .collect();

    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Shop {
        name: &'static str,
        lat: &'static str,
        lng: &'static str,
    }

    impl Located for Shop {
        fn coordinates(&self) -> Option<Coordinates> {
            Coordinates::parse(self.lat, self.lng)
        }
    }

    fn origin() -> Coordinates {
        Coordinates::new(-23.5505, -46.6333).unwrap()
    }

    fn fixture() -> Vec<Shop> {
        vec![
            Shop { name: "Pinheiros", lat: "-23.5670", lng: "-46.6930" },
            Shop { name: "Sé", lat: "-23.5503", lng: "-46.6340" },
            Shop { name: "Santo André", lat: "-23.6639", lng: "-46.5383" },
        ]
    }

    #[test]
    fn nearest_first() {
        let ranked = nearest_workshops(origin(), fixture());
        let names: Vec<_> = ranked.iter().map(|r| r.item.name).collect();
        assert_eq!(names, vec!["Sé", "Pinheiros", "Santo André"]);
    }

    #[test]
    fn distances_are_non_decreasing() {
        let ranked = nearest_workshops(origin(), fixture());
        let distances: Vec<f64> = ranked.iter().map(|r| r.distance_km.unwrap()).collect();
        for pair in distances.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn unlocated_entries_go_last() {
        let mut shops = fixture();
        shops.insert(0, Shop { name: "Sem mapa", lat: "", lng: "" });
        let ranked = nearest_workshops(origin(), shops);
        let last = ranked.last().unwrap();
        assert_eq!(last.item.name, "Sem mapa");
        assert!(last.distance_km.is_none());
    }

    #[test]
    fn ties_keep_input_order() {
        let shops = vec![
            Shop { name: "A", lat: "-23.0", lng: "-46.0" },
            Shop { name: "B", lat: "-23.0", lng: "-46.0" },
        ];
        let ranked = nearest_workshops(origin(), shops);
        assert_eq!(ranked[0].item.name, "A");
        assert_eq!(ranked[1].item.name, "B");
    }

    #[test]
    fn empty_input() {
        assert!(nearest_workshops::<Shop>(origin(), vec![]).is_empty());
    }
}
