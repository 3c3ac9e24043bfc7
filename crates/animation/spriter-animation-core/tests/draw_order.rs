//! Draw order and per-frame visibility of drawable parts.

use approx::assert_abs_diff_eq;
use spriter_animation_core::{Animation, AssetRef, Mainline, ObjectRef};
use spriter_test_fixtures::{key, skeleton, snapshot, sprite, timeline};

/// Two overlapping sprites whose z-indices swap at the 500ms snapshot, and a
/// third that is only referenced by the first snapshot.
fn layered() -> Animation {
    let front = timeline(
        0,
        "front",
        vec![
            key(0, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 0))),
            key(500, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 0))),
        ],
    );
    let back = timeline(
        1,
        "back",
        vec![
            key(0, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 1))),
            key(500, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 1))),
        ],
    );
    let flash = timeline(
        2,
        "flash",
        vec![key(0, sprite((0.0, 0.0), 1.0, AssetRef::new(0, 2)))],
    );

    let mainline = Mainline::new(vec![
        snapshot(
            0,
            vec![
                ObjectRef::sprite(0, 0, None, 0),
                ObjectRef::sprite(1, 0, None, 1),
                ObjectRef::sprite(2, 0, None, 2),
            ],
        ),
        snapshot(
            500,
            vec![
                ObjectRef::sprite(0, 1, None, 1),
                ObjectRef::sprite(1, 1, None, 0),
            ],
        ),
    ]);

    Animation::new("layers", 1000, true, mainline, vec![front, back, flash]).unwrap()
}

fn draw_order(animation: &mut Animation) -> Vec<u32> {
    animation
        .drawables()
        .filter(|sprite| sprite.visible)
        .map(|sprite| sprite.asset.unwrap().file)
        .collect()
}

#[test]
fn drawables_come_out_in_z_order() {
    let mut animation = layered();
    animation.prepare();

    animation.update(0.0);
    assert_eq!(draw_order(&mut animation), vec![0, 1, 2]);
}

#[test]
fn z_swap_reorders_lazily() {
    let mut animation = layered();
    animation.prepare();

    animation.update(0.0);
    assert_eq!(draw_order(&mut animation), vec![0, 1, 2]);

    // The 500ms snapshot swaps the two layers.
    animation.update(500.0);
    assert_eq!(draw_order(&mut animation), vec![1, 0]);

    // A second query without any z change keeps the order stable.
    assert_eq!(draw_order(&mut animation), vec![1, 0]);
}

#[test]
fn parts_absent_from_a_snapshot_become_invisible() {
    let mut animation = layered();
    animation.prepare();

    animation.update(0.0);
    assert!(animation.object(2).unwrap().as_sprite().unwrap().visible);

    // The second snapshot no longer references the flash sprite; it must
    // drop out rather than keep its stale pose.
    animation.update(600.0);
    assert!(!animation.object(2).unwrap().as_sprite().unwrap().visible);

    // Looping back to the first snapshot brings it back.
    animation.update(450.0);
    assert!(animation.object(2).unwrap().as_sprite().unwrap().visible);
}

#[test]
fn sprite_alpha_tweens_and_folds_in_animation_alpha() {
    let mut animation = skeleton(true);
    animation.prepare();

    animation.update(250.0);
    let hand = *animation.object_by_name("hand").unwrap().as_sprite().unwrap();
    assert_abs_diff_eq!(hand.alpha, 0.75, epsilon = 1e-4);

    animation.set_alpha(0.5);
    assert_abs_diff_eq!(animation.resolved_alpha(&hand), 0.375, epsilon = 1e-4);
}

#[test]
fn disabling_a_sprite_survives_resampling() {
    let mut animation = layered();
    animation.prepare();
    animation.update(0.0);

    // `enabled` is a gameplay-owned flag; the sampler only touches
    // `visible`.
    animation
        .object_mut(0)
        .unwrap()
        .as_sprite_mut()
        .unwrap()
        .enabled = false;
    animation.update(10.0);

    let front = animation.object(0).unwrap().as_sprite().unwrap();
    assert!(!front.enabled);
    assert!(front.visible);
}

#[test]
fn sprites_keep_their_asset_binding_through_tweens() {
    let mut animation = skeleton(true);
    animation.prepare();
    animation.update(250.0);

    let hand = animation.object_by_name("hand").unwrap().as_sprite().unwrap();
    assert_eq!(hand.asset, Some(AssetRef::new(0, 1)));
}
