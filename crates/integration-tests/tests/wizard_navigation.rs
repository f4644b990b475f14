//! Wizard navigation properties across all three verticals.

use gps_pay_core::BusinessType;
use gps_pay_portal::registration::{
    AccountFields, BusinessFields, MenuItemDraft, WizardStage, WizardState,
};

const ALL_VERTICALS: [BusinessType; 3] = [
    BusinessType::Restaurant,
    BusinessType::Toll,
    BusinessType::Service,
];

fn fill_valid_steps(wizard: &mut WizardState) {
    wizard.account = AccountFields {
        email: "a@b.com".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
    };
    wizard.next().expect("account step should validate");

    wizard.business = BusinessFields {
        name: "Some Business".to_owned(),
        service_category: "maintenance".to_owned(),
        address: "12 Main Street".to_owned(),
        lat: "12.9716".to_owned(),
        lng: "77.5946".to_owned(),
    };
    wizard.next().expect("business step should validate");

    wizard.payment.upi_id = "merchant@upi".to_owned();
    if wizard.business_type() == BusinessType::Restaurant {
        wizard.add_menu_item(MenuItemDraft {
            name: "Thali".to_owned(),
            price: "180".to_owned(),
            description: String::new(),
        });
    }
}

#[test]
fn mismatched_passwords_never_advance() {
    let mismatches = [
        ("secret1", "secret2"),
        ("secret1", "Secret1"),
        ("secret1", "secret1 "),
        ("longenoughpassword", "differentpassword"),
    ];

    for business_type in ALL_VERTICALS {
        for (password, confirmation) in mismatches {
            let mut wizard = WizardState::new(business_type);
            wizard.account = AccountFields {
                email: "a@b.com".to_owned(),
                password: password.to_owned(),
                confirm_password: confirmation.to_owned(),
            };

            assert!(wizard.next().is_err(), "{password:?}/{confirmation:?} must not advance");
            assert_eq!(wizard.stage(), WizardStage::Account);
        }
    }
}

#[test]
fn short_passwords_never_advance() {
    for length in 0..6 {
        let password = "x".repeat(length);
        let mut wizard = WizardState::new(BusinessType::Toll);
        wizard.account = AccountFields {
            email: "a@b.com".to_owned(),
            password: password.clone(),
            confirm_password: password,
        };

        assert!(wizard.next().is_err(), "length-{length} password must not advance");
        assert_eq!(wizard.stage(), WizardStage::Account);
    }
}

#[test]
fn submit_rejects_missing_coordinates_for_every_vertical() {
    for business_type in ALL_VERTICALS {
        for clear_lat in [true, false] {
            let mut wizard = WizardState::new(business_type);
            fill_valid_steps(&mut wizard);

            // Coordinates vanish after step 2 passed; the payment step is
            // fully valid but submission must still refuse.
            if clear_lat {
                wizard.business.lat = String::new();
            } else {
                wizard.business.lng = String::new();
            }

            let err = wizard.submit().expect_err("missing coordinate must reject");
            assert_eq!(err.to_string(), "Please set your location coordinates");
            assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
        }
    }
}

#[test]
fn back_then_next_returns_to_the_same_step_with_identical_data() {
    for business_type in ALL_VERTICALS {
        let mut wizard = WizardState::new(business_type);
        fill_valid_steps(&mut wizard);
        let before = wizard.clone();

        wizard.back().expect("back from payment step");
        assert_eq!(wizard.stage(), WizardStage::BusinessInfo);
        wizard.next().expect("unchanged valid data advances again");

        assert_eq!(wizard.stage(), WizardStage::PaymentDetails);
        assert_eq!(wizard.account, before.account);
        assert_eq!(wizard.business, before.business);
        assert_eq!(wizard.payment, before.payment);

        // And once more from the business step down to the account step
        wizard.back().expect("back to business info");
        wizard.back().expect("back to account");
        assert_eq!(wizard.stage(), WizardStage::Account);
        wizard.next().expect("account data intact");
        wizard.next().expect("business data intact");
        assert_eq!(wizard.payment, before.payment);
    }
}
