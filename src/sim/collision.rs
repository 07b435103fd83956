//! Swimmer-versus-entity overlap and coin scoring
//!
//! The swimmer sits at the centre column, lifted by whatever the wave field
//! says the surface height is this tick. Everything here is tested against
//! that single moving point.

use glam::DVec2;

use super::entity::{Coin, Shark};
use crate::consts::PLAYER_RADIUS;
use crate::{circles_overlap, player_position};

/// A coin consumed this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinPickup {
    pub pos: DVec2,
    pub plus: u32,
}

/// Points for a coin caught at the given lift. Thresholds are exclusive.
pub fn coin_points(player_height: f64) -> u32 {
    if player_height > 300.0 {
        4
    } else if player_height > 250.0 {
        3
    } else if player_height > 200.0 {
        2
    } else {
        1
    }
}

/// Remove every coin touching the swimmer and report what it was worth
pub fn collect_coins(coins: &mut Vec<Coin>, player_height: f64) -> Vec<CoinPickup> {
    let player = player_position(player_height);
    let (hit, kept): (Vec<Coin>, Vec<Coin>) = coins
        .drain(..)
        .partition(|c| circles_overlap(c.pos, c.radius, player, PLAYER_RADIUS));
    *coins = kept;

    let plus = coin_points(player_height);
    hit.into_iter()
        .map(|c| CoinPickup { pos: c.pos, plus })
        .collect()
}

/// Index of the first shark touching the swimmer
pub fn shark_strike(sharks: &[Shark], player_height: f64) -> Option<usize> {
    let player = player_position(player_height);
    sharks
        .iter()
        .position(|s| circles_overlap(s.pos, s.radius, player, PLAYER_RADIUS))
}

/// The swimmer was lifted last tick and is back on the baseline now
#[inline]
pub fn just_landed(prev_height: f64, height: f64) -> bool {
    prev_height > 0.0 && height == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_coin_tiers_are_exclusive() {
        assert_eq!(coin_points(0.0), 1);
        assert_eq!(coin_points(200.0), 1);
        assert_eq!(coin_points(200.5), 2);
        assert_eq!(coin_points(250.0), 2);
        assert_eq!(coin_points(251.0), 3);
        assert_eq!(coin_points(300.0), 3);
        assert_eq!(coin_points(301.0), 4);
    }

    #[test]
    fn test_coin_tiers_monotonic() {
        let mut last = 0;
        for h in 0..400 {
            let p = coin_points(h as f64);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_coin_at_exact_reach_is_not_collected() {
        let reach = COIN_RADIUS + PLAYER_RADIUS;
        let player = player_position(0.0);
        let mut coins = vec![Coin::new(DVec2::new(player.x + reach, player.y), COIN_SPEED)];
        assert!(collect_coins(&mut coins, 0.0).is_empty());
        assert_eq!(coins.len(), 1);
    }

    #[test]
    fn test_coin_just_inside_reach_is_collected() {
        let reach = COIN_RADIUS + PLAYER_RADIUS;
        let player = player_position(0.0);
        let mut coins = vec![
            Coin::new(DVec2::new(player.x + reach - 1e-6, player.y), COIN_SPEED),
            Coin::new(DVec2::new(0.0, 100.0), COIN_SPEED),
        ];
        let picked = collect_coins(&mut coins, 0.0);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].plus, 1);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].pos.x, 0.0);
    }

    #[test]
    fn test_high_coin_needs_lift() {
        let player_high = player_position(260.0);
        let mut coins = vec![Coin::new(player_high, -COIN_SPEED)];

        assert!(collect_coins(&mut coins, 0.0).is_empty());
        let picked = collect_coins(&mut coins, 260.0);
        assert_eq!(picked, vec![CoinPickup { pos: player_high, plus: 3 }]);
        assert!(coins.is_empty());
    }

    #[test]
    fn test_shark_strike() {
        let player = player_position(0.0);
        let sharks = vec![
            Shark::new(DVec2::new(0.0, 400.0), SHARK_SPEED),
            Shark::new(DVec2::new(player.x, player.y + 19.0), SHARK_SPEED),
        ];
        assert_eq!(shark_strike(&sharks, 0.0), Some(1));
        // Lifting the swimmer clears the strike
        assert_eq!(shark_strike(&sharks, 30.0), None);
        assert_eq!(shark_strike(&[], 0.0), None);
    }

    #[test]
    fn test_just_landed() {
        assert!(just_landed(12.0, 0.0));
        assert!(!just_landed(0.0, 0.0));
        assert!(!just_landed(12.0, 3.0));
        assert!(!just_landed(-4.0, 0.0));
    }
}
