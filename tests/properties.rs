//! Property tests over random machine settings.

use enigmasim::{catalogue, ChainElement, EnigmaMachine, MachineConfig, Scrambler};
use proptest::prelude::*;

const ROTOR_NAMES: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

fn rotors_strategy() -> impl Strategy<Value = Vec<String>> {
    Just(ROTOR_NAMES.to_vec())
        .prop_shuffle()
        .prop_map(|names| names[..3].iter().map(|s| s.to_string()).collect())
}

fn plugboard_strategy() -> impl Strategy<Value = String> {
    (Just(('A'..='Z').collect::<Vec<char>>()).prop_shuffle(), 0usize..=13).prop_map(
        |(letters, pairs)| {
            letters[..pairs * 2]
                .chunks(2)
                .map(|pair| pair.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join(" ")
        },
    )
}

prop_compose! {
    fn config_strategy()(
        reflector in prop::sample::select(vec!["A", "B"]),
        rotors in rotors_strategy(),
        rings in prop::collection::vec(1i64..=26, 3),
        key in "[A-Z]{3}",
        plugboard in plugboard_strategy(),
    ) -> MachineConfig {
        MachineConfig {
            reflector: Some(reflector.to_string()),
            rotors,
            rings,
            key,
            plugboard,
            ..MachineConfig::default()
        }
    }
}

fn machine(config: &MachineConfig) -> EnigmaMachine {
    config
        .build()
        .unwrap_or_else(|e| panic!("config {config:?} rejected: {e}"))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn decrypt_inverts_encrypt(config in config_strategy(), text in "[A-Z]{0,300}") {
        let cipher = machine(&config).encode(&text).unwrap();
        let plain = machine(&config).encode(&cipher).unwrap();
        prop_assert_eq!(plain, text);
    }

    #[test]
    fn no_letter_encrypts_to_itself(config in config_strategy(), text in "[A-Z]{1,200}") {
        let cipher = machine(&config).encode(&text).unwrap();
        prop_assert_eq!(cipher.len(), text.len());
        for (p, c) in text.chars().zip(cipher.chars()) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn encode_char_is_deterministic(config in config_strategy(), symbol in "[A-Z]") {
        let machine = machine(&config);
        let symbol = symbol.chars().next().unwrap();
        let before = machine.rotors_position();
        let first = machine.encode_char(symbol).unwrap();
        prop_assert_eq!(machine.encode_char(symbol).unwrap(), first);
        prop_assert_eq!(machine.rotors_position(), before);
    }

    #[test]
    fn failed_encode_leaves_machine_unchanged(
        config in config_strategy(),
        prefix in "[A-Z]{0,50}",
        bad in "[a-z0-9#]",
    ) {
        let mut machine = machine(&config);
        let before = machine.rotors_position();
        let input = format!("{prefix}{bad}");
        prop_assert!(machine.encode(&input).is_err());
        prop_assert_eq!(machine.rotors_position(), before);
    }

    #[test]
    fn connectors_are_symmetric(config in config_strategy(), steps in 0usize..700) {
        let mut machine = machine(&config);
        for _ in 0..steps {
            machine.step();
        }
        let chain = machine.chain();
        for element in chain.elements() {
            if let ChainElement::Connector(connector) = element {
                for c in 'A'..='Z' {
                    let there = connector.input(chain, c).unwrap();
                    prop_assert_eq!(connector.output(chain, there).unwrap(), c);
                }
            }
        }
    }

    #[test]
    fn reflector_output_is_identity(symbol in "[A-Z]") {
        let symbol = symbol.chars().next().unwrap();
        for spec in [
            &catalogue::REFLECTOR_A,
            &catalogue::REFLECTOR_B,
            &catalogue::REFLECTOR_B_THIN,
            &catalogue::REFLECTOR_C_THIN,
        ] {
            let reflector = Scrambler::reflector(spec).unwrap();
            prop_assert_eq!(reflector.output(symbol).unwrap(), symbol);
        }
    }
}
