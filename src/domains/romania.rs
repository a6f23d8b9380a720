use crate::state::{ResourceExhausted, SearchState};

use std::fmt;

/// Cities of the Romania road map from Russell and Norvig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Arad,
    Bucharest,
    Craiova,
    Drobeta,
    Eforie,
    Fagaras,
    Giurgiu,
    Hirsova,
    Iasi,
    Lugoj,
    Mehadia,
    Neamt,
    Oradea,
    Pitesti,
    RimnicuVilcea,
    Sibiu,
    Timisoara,
    Urziceni,
    Vaslui,
    Zerind,
}

use City::*;

impl City {
    pub const ALL: [City; 20] = [
        Arad,
        Bucharest,
        Craiova,
        Drobeta,
        Eforie,
        Fagaras,
        Giurgiu,
        Hirsova,
        Iasi,
        Lugoj,
        Mehadia,
        Neamt,
        Oradea,
        Pitesti,
        RimnicuVilcea,
        Sibiu,
        Timisoara,
        Urziceni,
        Vaslui,
        Zerind,
    ];

    pub fn from_name(name: &str) -> Option<City> {
        City::ALL
            .iter()
            .copied()
            .find(|city| city.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Arad => "Arad",
            Bucharest => "Bucharest",
            Craiova => "Craiova",
            Drobeta => "Drobeta",
            Eforie => "Eforie",
            Fagaras => "Fagaras",
            Giurgiu => "Giurgiu",
            Hirsova => "Hirsova",
            Iasi => "Iasi",
            Lugoj => "Lugoj",
            Mehadia => "Mehadia",
            Neamt => "Neamt",
            Oradea => "Oradea",
            Pitesti => "Pitesti",
            RimnicuVilcea => "RimnicuVilcea",
            Sibiu => "Sibiu",
            Timisoara => "Timisoara",
            Urziceni => "Urziceni",
            Vaslui => "Vaslui",
            Zerind => "Zerind",
        }
    }

    /// Straight-line distances to Bucharest, taken from the book.
    fn straight_line_to_bucharest(self) -> f32 {
        match self {
            Arad => 366.0,
            Bucharest => 0.0,
            Craiova => 160.0,
            Drobeta => 242.0,
            Eforie => 161.0,
            Fagaras => 176.0,
            Giurgiu => 77.0,
            Hirsova => 151.0,
            Iasi => 226.0,
            Lugoj => 244.0,
            Mehadia => 241.0,
            Neamt => 234.0,
            Oradea => 380.0,
            Pitesti => 100.0,
            RimnicuVilcea => 193.0,
            Sibiu => 253.0,
            Timisoara => 329.0,
            Urziceni => 80.0,
            Vaslui => 199.0,
            Zerind => 374.0,
        }
    }

    /// Roads leaving this city with their lengths in kilometers. The map is
    /// undirected so every road appears under both endpoints.
    fn roads(self) -> &'static [(City, f32)] {
        match self {
            Arad => &[(Sibiu, 140.0), (Timisoara, 118.0), (Zerind, 75.0)],
            Bucharest => &[
                (Fagaras, 211.0),
                (Giurgiu, 90.0),
                (Pitesti, 101.0),
                (Urziceni, 85.0),
            ],
            Craiova => &[(Drobeta, 120.0), (Pitesti, 138.0), (RimnicuVilcea, 146.0)],
            Drobeta => &[(Craiova, 120.0), (Mehadia, 75.0)],
            Eforie => &[(Hirsova, 86.0)],
            Fagaras => &[(Bucharest, 211.0), (Sibiu, 99.0)],
            Giurgiu => &[(Bucharest, 90.0)],
            Hirsova => &[(Eforie, 86.0), (Urziceni, 98.0)],
            Iasi => &[(Neamt, 87.0), (Vaslui, 92.0)],
            Lugoj => &[(Mehadia, 70.0), (Timisoara, 111.0)],
            Mehadia => &[(Drobeta, 75.0), (Lugoj, 70.0)],
            Neamt => &[(Iasi, 87.0)],
            Oradea => &[(Sibiu, 151.0), (Zerind, 71.0)],
            Pitesti => &[(Bucharest, 101.0), (Craiova, 138.0), (RimnicuVilcea, 97.0)],
            RimnicuVilcea => &[(Craiova, 146.0), (Pitesti, 97.0), (Sibiu, 80.0)],
            Sibiu => &[
                (Arad, 140.0),
                (Fagaras, 99.0),
                (Oradea, 151.0),
                (RimnicuVilcea, 80.0),
            ],
            Timisoara => &[(Arad, 118.0), (Lugoj, 111.0)],
            Urziceni => &[(Bucharest, 85.0), (Hirsova, 98.0), (Vaslui, 142.0)],
            Vaslui => &[(Iasi, 92.0), (Urziceni, 142.0)],
            Zerind => &[(Arad, 75.0), (Oradea, 71.0)],
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SearchState for City {
    /// The tabulated estimates are valid toward Bucharest only, which is the
    /// goal of every route in this map.
    fn heuristic(&self, _goal: &Self) -> f32 {
        self.straight_line_to_bucharest()
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self.same_as(goal)
    }

    fn successors(&self, _parent: Option<&Self>) -> Result<Vec<City>, ResourceExhausted> {
        Ok(self.roads().iter().map(|&(city, _)| city).collect())
    }

    fn transition_cost(&self, successor: &Self) -> f32 {
        self.roads()
            .iter()
            .find(|&&(city, _)| city == *successor)
            .map(|&(_, km)| km)
            // Cities without a direct road are unreachable in one move.
            .unwrap_or(f32::INFINITY)
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AStarSearch, Status};

    #[test]
    fn test_arad_to_bucharest_shortest_route() {
        let mut engine = AStarSearch::new();
        engine.initialize(Arad, Bucharest);
        assert_eq!(engine.solve(), Status::Succeeded);

        let route: Vec<City> = engine.solution_forward().unwrap().copied().collect();
        assert_eq!(route, vec![Arad, Sibiu, RimnicuVilcea, Pitesti, Bucharest]);
        assert_eq!(engine.stats().cost, 418.0);

        let back: Vec<City> = engine.solution_backward().unwrap().copied().collect();
        assert_eq!(back, vec![Bucharest, Pitesti, RimnicuVilcea, Sibiu, Arad]);
    }

    #[test]
    fn test_straight_line_estimates_are_nonnegative() {
        for city in City::ALL {
            assert!(city.heuristic(&Bucharest) >= 0.0, "{city} estimate");
        }
        assert_eq!(Bucharest.heuristic(&Bucharest), 0.0);
    }

    #[test]
    fn test_roads_are_bidirectional() {
        for city in City::ALL {
            for &(neighbor, km) in city.roads() {
                let back = neighbor
                    .roads()
                    .iter()
                    .find(|&&(c, _)| c == city)
                    .map(|&(_, back_km)| back_km);
                assert_eq!(back, Some(km), "road {city} - {neighbor}");
            }
        }
    }

    #[test]
    fn test_transition_cost_matches_road_length() {
        assert_eq!(Arad.transition_cost(&Sibiu), 140.0);
        assert_eq!(Sibiu.transition_cost(&Arad), 140.0);
        assert_eq!(Arad.transition_cost(&Bucharest), f32::INFINITY);
    }

    #[test]
    fn test_city_name_lookup() {
        assert_eq!(City::from_name("Arad"), Some(Arad));
        assert_eq!(City::from_name("rimnicuvilcea"), Some(RimnicuVilcea));
        assert_eq!(City::from_name("Atlantis"), None);
    }
}
