//! Skin and revive purchases
//!
//! Each purchase either fully applies or returns an error with the profile
//! untouched.

use crate::error::{SessionError, SessionResult};
use crate::profile::Profile;
use crate::tuning::Tuning;

/// Skins on sale, in display order
pub const SKINS: [&str; 5] = ["pink", "blue", "green", "purple", "orange"];

pub fn is_known_skin(skin: &str) -> bool {
    SKINS.contains(&skin)
}

fn charge(profile: &mut Profile, price: u64) -> SessionResult<()> {
    if profile.total_coins < price {
        return Err(SessionError::NotEnoughCoins {
            needed: price,
            available: profile.total_coins,
        });
    }
    profile.total_coins -= price;
    Ok(())
}

/// Buy a skin (does not select it)
pub fn unlock_skin(profile: &mut Profile, skin: &str, tuning: &Tuning) -> SessionResult<()> {
    if !is_known_skin(skin) {
        return Err(SessionError::UnknownSkin(skin.to_string()));
    }
    if profile.is_unlocked(skin) {
        return Err(SessionError::SkinAlreadyUnlocked(skin.to_string()));
    }
    charge(profile, tuning.skin_price)?;
    profile.unlocked_skins.push(skin.to_string());
    log::info!("Unlocked skin {skin} ({} coins left)", profile.total_coins);
    Ok(())
}

pub fn select_skin(profile: &mut Profile, skin: &str) -> SessionResult<()> {
    if !is_known_skin(skin) {
        return Err(SessionError::UnknownSkin(skin.to_string()));
    }
    if !profile.is_unlocked(skin) {
        return Err(SessionError::SkinLocked(skin.to_string()));
    }
    profile.selected_skin = skin.to_string();
    Ok(())
}

pub fn buy_revive(profile: &mut Profile, tuning: &Tuning) -> SessionResult<()> {
    charge(profile, tuning.revive_price)?;
    profile.revives = profile.revives.saturating_add(1);
    log::info!("Bought a revive ({} held)", profile.revives);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich() -> Profile {
        Profile {
            total_coins: 1500,
            ..Profile::default()
        }
    }

    #[test]
    fn test_unlock_then_select() {
        let tuning = Tuning::default();
        let mut profile = rich();
        assert_eq!(
            select_skin(&mut profile, "blue"),
            Err(SessionError::SkinLocked("blue".to_string()))
        );
        unlock_skin(&mut profile, "blue", &tuning).unwrap();
        assert_eq!(profile.total_coins, 500);
        select_skin(&mut profile, "blue").unwrap();
        assert_eq!(profile.selected_skin, "blue");
    }

    #[test]
    fn test_rejected_purchases_change_nothing() {
        let tuning = Tuning::default();
        let mut profile = rich();
        unlock_skin(&mut profile, "green", &tuning).unwrap();
        let before = profile.clone();

        assert_eq!(
            unlock_skin(&mut profile, "green", &tuning),
            Err(SessionError::SkinAlreadyUnlocked("green".to_string()))
        );
        assert_eq!(
            unlock_skin(&mut profile, "purple", &tuning),
            Err(SessionError::NotEnoughCoins {
                needed: 1000,
                available: 500
            })
        );
        assert_eq!(
            unlock_skin(&mut profile, "gold", &tuning),
            Err(SessionError::UnknownSkin("gold".to_string()))
        );
        assert_eq!(profile, before);
    }

    #[test]
    fn test_buy_revive() {
        let tuning = Tuning::default();
        let mut profile = Profile {
            total_coins: 250,
            ..Profile::default()
        };
        buy_revive(&mut profile, &tuning).unwrap();
        assert_eq!((profile.total_coins, profile.revives), (50, 1));
        assert!(buy_revive(&mut profile, &tuning).is_err());
        assert_eq!((profile.total_coins, profile.revives), (50, 1));
    }
}
