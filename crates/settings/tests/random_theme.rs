use rand_mt::Mt;
use rustpad_settings::{generate_random_color_with, generate_random_theme_with, DEFAULT_FONT};

fn seeded(seed: u32) -> Mt {
    Mt::new_with_key([seed])
}

#[test]
fn random_color_is_reproducible_for_a_seed() {
    let mut rng = seeded(123);
    let color = generate_random_color_with(&mut rng);

    assert_eq!(color.len(), 7);
    assert!(color.starts_with('#'));
    assert_eq!(color, "#182D83");
}

#[test]
fn random_theme_is_reproducible_for_a_seed() {
    let mut rng = seeded(123);
    let theme = generate_random_theme_with(&mut rng);

    assert_eq!(theme.background, "#182D83");
    assert_eq!(theme.foreground, "#1CAA15");
    assert_eq!(theme.font_style.as_deref(), Some(DEFAULT_FONT));
    assert_eq!(theme.font_size, Some(13));
}

#[test]
fn different_seeds_produce_different_themes() {
    let first = generate_random_theme_with(&mut seeded(123));
    let second = generate_random_theme_with(&mut seeded(7));

    assert_eq!(second.background, "#A4C123");
    assert_eq!(second.foreground, "#B1612D");
    assert_eq!(second.font_size, Some(31));
    assert_ne!(first, second);
}
