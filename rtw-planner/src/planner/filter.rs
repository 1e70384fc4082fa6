//! Candidate filter pipeline.
//!
//! Narrows the catalog to the flights that can legally extend a partial
//! itinerary. Each stage is a plain predicate; the pipelines apply them
//! cheapest-first and keep catalog order.

use crate::domain::{Flight, Itinerary};

use super::config::JourneyWindow;

/// The candidate departs strictly after the itinerary's last arrival.
pub fn departs_after_arrival(itinerary: &Itinerary, candidate: &Flight) -> bool {
    candidate.depart_time() > itinerary.last().arrive_time()
}

/// The candidate does not fly into a country the itinerary already left.
pub fn reaches_new_country(itinerary: &Itinerary, candidate: &Flight) -> bool {
    !itinerary.has_departed_from(candidate.dest_country())
}

/// The candidate leaves from where the itinerary arrived, without bouncing
/// straight back to the previous country.
pub fn continues_route(itinerary: &Itinerary, candidate: &Flight) -> bool {
    let last = itinerary.last();
    candidate.origin_country() == last.dest_country()
        && candidate.dest_country() != last.origin_country()
}

/// The candidate arrives within the journey window of the first departure.
///
/// A window whose end cannot be represented admits nothing.
pub fn within_window(itinerary: &Itinerary, candidate: &Flight, window: &JourneyWindow) -> bool {
    let Some(deadline) = itinerary.departure_time().checked_add_months(window.span) else {
        return false;
    };
    match candidate.arrive_time().checked_sub_signed(window.tolerance) {
        Some(slackened) => slackened < deadline,
        None => true,
    }
}

/// The candidate flies back to the country the itinerary started from.
pub fn closes_loop(itinerary: &Itinerary, candidate: &Flight) -> bool {
    candidate.dest_country() == itinerary.origin_country()
}

/// Flights that can extend `itinerary` by one non-final leg.
///
/// Applies, in order: temporal continuity, country novelty, routing
/// continuity and the journey window. An empty result marks a dead end.
pub fn filter_candidates(
    itinerary: &Itinerary,
    catalog: &[Flight],
    window: &JourneyWindow,
) -> Vec<Flight> {
    catalog
        .iter()
        .filter(|c| departs_after_arrival(itinerary, c))
        .filter(|c| reaches_new_country(itinerary, c))
        .filter(|c| continues_route(itinerary, c))
        .filter(|c| within_window(itinerary, c, window))
        .copied()
        .collect()
}

/// Flights that can close `itinerary` as its final leg.
///
/// Same as [`filter_candidates`] with the country-novelty stage replaced by
/// the closing-loop stage.
pub fn filter_terminal_candidates(
    itinerary: &Itinerary,
    catalog: &[Flight],
    window: &JourneyWindow,
) -> Vec<Flight> {
    catalog
        .iter()
        .filter(|c| departs_after_arrival(itinerary, c))
        .filter(|c| closes_loop(itinerary, c))
        .filter(|c| continues_route(itinerary, c))
        .filter(|c| within_window(itinerary, c, window))
        .copied()
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AirportCode, CountryCode, Endpoint};
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    const COUNTRIES: [&str; 5] = ["CZ", "GB", "US", "JP", "BR"];

    fn endpoint(idx: usize) -> Endpoint {
        let country = COUNTRIES[idx];
        Endpoint::new(
            AirportCode::parse(&format!("{country}X")).unwrap(),
            CountryCode::parse(country).unwrap(),
        )
    }

    /// (origin, destination, departure offset in hours, duration in hours)
    fn arb_flight() -> impl Strategy<Value = Flight> {
        (0..COUNTRIES.len(), 0..COUNTRIES.len(), 0i64..24 * 500, 1i64..48).prop_map(
            |(from, to, offset, hours)| {
                let depart = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap()
                    + Duration::hours(offset);
                Flight::new(endpoint(from), depart, endpoint(to), depart + Duration::hours(hours))
                    .unwrap()
            },
        )
    }

    proptest! {
        /// Every surviving candidate comes from the catalog and passes every stage.
        #[test]
        fn candidates_are_valid_subset(
            seed in arb_flight(),
            catalog in prop::collection::vec(arb_flight(), 0..60),
        ) {
            let itinerary = Itinerary::from_seed(seed);
            let window = JourneyWindow::default();

            let candidates = filter_candidates(&itinerary, &catalog, &window);
            for c in &candidates {
                prop_assert!(catalog.contains(c));
                prop_assert!(departs_after_arrival(&itinerary, c));
                prop_assert!(reaches_new_country(&itinerary, c));
                prop_assert!(continues_route(&itinerary, c));
                prop_assert!(within_window(&itinerary, c, &window));
            }

            let terminal = filter_terminal_candidates(&itinerary, &catalog, &window);
            for c in &terminal {
                prop_assert!(catalog.contains(c));
                prop_assert!(departs_after_arrival(&itinerary, c));
                prop_assert!(closes_loop(&itinerary, c));
                prop_assert!(continues_route(&itinerary, c));
                prop_assert!(within_window(&itinerary, c, &window));
            }
        }

        /// Nothing that passes every stage is dropped.
        #[test]
        fn no_valid_candidate_is_dropped(
            seed in arb_flight(),
            catalog in prop::collection::vec(arb_flight(), 0..60),
        ) {
            let itinerary = Itinerary::from_seed(seed);
            let window = JourneyWindow::default();

            let expected = catalog
                .iter()
                .filter(|c| {
                    departs_after_arrival(&itinerary, c)
                        && reaches_new_country(&itinerary, c)
                        && continues_route(&itinerary, c)
                        && within_window(&itinerary, c, &window)
                })
                .count();
            prop_assert_eq!(filter_candidates(&itinerary, &catalog, &window).len(), expected);
        }
    }
}
