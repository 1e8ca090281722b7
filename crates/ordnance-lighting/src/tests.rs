#[cfg(test)]
mod tests {
    use ordnance_core::config::PaletteEffectInfo;
    use ordnance_core::enums::LightingEffect;
    use ordnance_core::types::Color;

    use crate::effect::WorldPaletteEffect;
    use crate::fsm::{next_transition, CyclePhase, Transition};
    use crate::palette::{Palette, PaletteSet};
    use crate::profiles::color_for_effect;

    fn short_cycle() -> PaletteEffectInfo {
        PaletteEffectInfo {
            fade_length: 2,
            morning_day_transition_length: 3,
            day_length: 4,
            day_evening_transition_length: 5,
            evening_night_transition_length: 6,
            night_length: 7,
            night_morning_transition_length: 8,
            day_night_cycle: true,
            initial_effect: LightingEffect::Morning,
            ..Default::default()
        }
    }

    fn run_until_phase_change(effect: &mut WorldPaletteEffect) -> u32 {
        let start = effect.phase();
        let start_to = effect.to();
        for ticks in 1..10_000 {
            effect.tick_render();
            if effect.phase() != start || effect.to() != start_to {
                return ticks;
            }
        }
        panic!("phase never changed from {start:?}");
    }

    // ---- Transition table ----

    #[test]
    fn test_transition_table() {
        let info = short_cycle();
        let cases = [
            (CyclePhase::Fade, LightingEffect::Morning, CyclePhase::MorningToDay, LightingEffect::Day, 3),
            (CyclePhase::MorningToDay, LightingEffect::Day, CyclePhase::Day, LightingEffect::Day, 4),
            (CyclePhase::Fade, LightingEffect::Day, CyclePhase::Day, LightingEffect::Day, 4),
            (CyclePhase::Day, LightingEffect::Day, CyclePhase::DayToEvening, LightingEffect::Evening, 5),
            (CyclePhase::DayToEvening, LightingEffect::Evening, CyclePhase::EveningToNight, LightingEffect::Night, 6),
            (CyclePhase::EveningToNight, LightingEffect::Night, CyclePhase::Night, LightingEffect::Night, 7),
            (CyclePhase::Night, LightingEffect::Night, CyclePhase::NightToMorning, LightingEffect::Morning, 8),
            (CyclePhase::NightToMorning, LightingEffect::Morning, CyclePhase::MorningToDay, LightingEffect::Day, 3),
        ];
        for (phase, to, next_phase, next_to, length) in cases {
            assert_eq!(
                next_transition(phase, to, &info),
                Some(Transition {
                    phase: next_phase,
                    to: next_to,
                    length
                }),
                "from {phase:?} fading to {to:?}"
            );
        }
    }

    #[test]
    fn test_non_cycle_effects_have_no_transition() {
        let info = short_cycle();
        for to in [
            LightingEffect::None,
            LightingEffect::Black,
            LightingEffect::Desaturated,
        ] {
            assert_eq!(next_transition(CyclePhase::Fade, to, &info), None);
        }
    }

    // ---- State machine ----

    #[test]
    fn test_world_load_fades_from_black() {
        let mut effect = WorldPaletteEffect::new(short_cycle());
        effect.world_loaded();
        assert_eq!(effect.phase(), CyclePhase::Fade);
        assert_eq!(effect.from(), LightingEffect::Black);
        assert_eq!(effect.to(), LightingEffect::Morning);
        assert_eq!(effect.remaining_frames(), 2);
    }

    #[test]
    fn test_full_day_night_cycle_timing() {
        let mut effect = WorldPaletteEffect::new(short_cycle());
        effect.world_loaded();

        let expected = [
            (2, CyclePhase::MorningToDay, LightingEffect::Day),
            (3, CyclePhase::Day, LightingEffect::Day),
            (4, CyclePhase::DayToEvening, LightingEffect::Evening),
            (5, CyclePhase::EveningToNight, LightingEffect::Night),
            (6, CyclePhase::Night, LightingEffect::Night),
            (7, CyclePhase::NightToMorning, LightingEffect::Morning),
            (8, CyclePhase::MorningToDay, LightingEffect::Day),
        ];
        for (ticks, phase, to) in expected {
            assert_eq!(run_until_phase_change(&mut effect), ticks);
            assert_eq!(effect.phase(), phase);
            assert_eq!(effect.to(), to);
        }
    }

    #[test]
    fn test_day_hold_blends_day_into_day() {
        let mut effect = WorldPaletteEffect::new(short_cycle());
        effect.world_loaded();
        run_until_phase_change(&mut effect);
        run_until_phase_change(&mut effect);
        assert_eq!(effect.phase(), CyclePhase::Day);
        assert_eq!(effect.from(), LightingEffect::Day);
        assert_eq!(effect.to(), LightingEffect::Day);
    }

    #[test]
    fn test_without_cycle_effect_holds() {
        let info = PaletteEffectInfo {
            day_night_cycle: false,
            ..short_cycle()
        };
        let mut effect = WorldPaletteEffect::new(info);
        effect.world_loaded();
        for _ in 0..100 {
            effect.tick_render();
        }
        assert_eq!(effect.phase(), CyclePhase::Fade);
        assert_eq!(effect.to(), LightingEffect::Morning);
        assert_eq!(effect.remaining_frames(), 0);
    }

    #[test]
    fn test_fade_out_goes_to_black() {
        let mut effect = WorldPaletteEffect::new(PaletteEffectInfo {
            initial_effect: LightingEffect::Evening,
            ..Default::default()
        });
        effect.world_loaded();
        for _ in 0..10 {
            effect.tick_render();
        }
        effect.fade_out();
        assert_eq!(effect.from(), LightingEffect::Evening);
        assert_eq!(effect.to(), LightingEffect::Black);
        assert_eq!(effect.remaining_frames(), 10);
    }

    // ---- Color grading ----

    #[test]
    fn test_color_for_effect() {
        let info = PaletteEffectInfo::default();
        let c = Color::rgba(200, 100, 50, 128);
        assert_eq!(color_for_effect(&info, LightingEffect::None, c), c);
        assert_eq!(
            color_for_effect(&info, LightingEffect::Black, c),
            Color::rgba(0, 0, 0, 128)
        );
        assert_eq!(
            color_for_effect(&info, LightingEffect::Night, c),
            Color::rgba(70, 45, 30, 128)
        );
        assert_eq!(color_for_effect(&info, LightingEffect::Day, c), c);
        assert_eq!(
            color_for_effect(&info, LightingEffect::Desaturated, Color::rgb(255, 0, 0)),
            Color::rgb(127, 127, 127)
        );
    }

    #[test]
    fn test_adjust_palettes_blends_and_skips_excluded() {
        let base = Color::rgb(200, 100, 50);
        let mut palettes = PaletteSet::new();
        palettes.insert("terrain".to_string(), Palette::filled(base));
        palettes.insert("chrome".to_string(), Palette::filled(base));

        let mut effect = WorldPaletteEffect::new(PaletteEffectInfo {
            initial_effect: LightingEffect::Day,
            ..Default::default()
        });
        effect.world_loaded();

        // Start of the fade is still fully black.
        let mut frame = palettes.clone();
        effect.adjust_palettes(&mut frame);
        assert_eq!(frame["terrain"].color(0), Color::rgb(0, 0, 0));
        assert_eq!(frame["chrome"].color(0), base);

        for _ in 0..5 {
            effect.tick_render();
        }
        let mut frame = palettes.clone();
        effect.adjust_palettes(&mut frame);
        assert_eq!(frame["terrain"].color(255), Color::rgb(100, 50, 25));

        for _ in 0..5 {
            effect.tick_render();
        }
        let mut frame = palettes.clone();
        effect.adjust_palettes(&mut frame);
        assert_eq!(frame["terrain"].color(17), base);
    }

    #[test]
    fn test_adjust_palettes_noop_when_settled_on_none() {
        let mut palettes = PaletteSet::new();
        palettes.insert("terrain".to_string(), Palette::filled(Color::rgb(1, 2, 3)));
        let mut effect = WorldPaletteEffect::new(PaletteEffectInfo::default());
        effect.world_loaded();
        for _ in 0..10 {
            effect.tick_render();
        }
        let before = palettes.clone();
        effect.adjust_palettes(&mut palettes);
        assert_eq!(palettes, before);
    }

    #[test]
    fn test_palette_from_colors_pads() {
        let palette = Palette::from_colors(&[Color::RED, Color::WHITE]);
        assert_eq!(palette.len(), 256);
        assert_eq!(palette.color(1), Color::WHITE);
        assert_eq!(palette.color(2), Color::TRANSPARENT);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let info = short_cycle();
        let json = serde_json::to_string(&info).unwrap();
        let back = PaletteEffectInfo::from_json(&json).unwrap();
        assert_eq!(back.night_length, 7);
        assert!(back.day_night_cycle);
    }
}
