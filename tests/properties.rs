//! Property tests over the sample Beijing configuration.

use proptest::collection::vec;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

use tax_engine::calculation::{calculate_insurances, calculate_monthly_taxes, find_bracket};
use tax_engine::config::{ConfigLoader, TaxConfig};
use tax_engine::models::{EndowmentType, ResidenceType, SalaryBase, Salaries};

fn load_config() -> TaxConfig {
    ConfigLoader::load_tax_config("./config/tax.yaml").expect("Failed to load config")
}

fn yuan(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_contributions_stay_within_bound_amounts(
        cents in 0i64..6_000_000,
        agricultural in proptest::bool::ANY,
        office in proptest::bool::ANY,
    ) {
        let config = load_config();
        let residence = if agricultural {
            ResidenceType::Agricultural
        } else {
            ResidenceType::NonAgricultural
        };
        let endowment = if office { EndowmentType::Office } else { EndowmentType::Workers };
        let salary = SalaryBase::from_salary(yuan(cents), Decimal::new(12, 0));

        let result = calculate_insurances(&config.insurances, residence, endowment, &salary)
            .unwrap();

        for c in &result.contributions {
            prop_assert!(c.base >= c.table.min_base && c.base <= c.table.max_base);
            prop_assert!(c.amount.company >= c.min_amount.company);
            prop_assert!(c.amount.company <= c.max_amount.company);
            prop_assert!(c.amount.private >= c.min_amount.private);
            prop_assert!(c.amount.private <= c.max_amount.private);
        }
        let company: Decimal = result.contributions.iter().map(|c| c.amount.company).sum();
        prop_assert_eq!(result.company_total, company);
    }

    #[test]
    fn prop_running_totals_equal_sum_of_months(
        months in vec(300_000i64..8_000_000, 1..=12),
        project in proptest::bool::ANY,
    ) {
        let config = load_config();
        let salaries = Salaries {
            project_full_year: project,
            residence: ResidenceType::NonAgricultural,
            endowment: EndowmentType::Workers,
            monthly_salaries: months
                .iter()
                .map(|cents| SalaryBase::from_salary(yuan(*cents), Decimal::new(12, 0)))
                .collect(),
        };

        let result = calculate_monthly_taxes(&config, &salaries).unwrap();
        let expected_len = if project { 12 } else { months.len() };
        prop_assert_eq!(result.taxes.len(), expected_len);

        let last = result.taxes.last().unwrap();
        let taxation: Decimal = result.taxes.iter().map(|t| t.settlement.taxation).sum();
        let net: Decimal = result.taxes.iter().map(|t| t.settlement.net_salary).sum();
        let insurances: Decimal = result.taxes.iter().map(|t| t.insurances).sum();
        let funds: Decimal = result.taxes.iter().map(|t| t.accumulation_fund).sum();

        prop_assert_eq!(last.settlement.history_taxation, taxation);
        prop_assert_eq!(last.settlement.history_salary, net);
        prop_assert_eq!(last.history_insurances, insurances);
        prop_assert_eq!(last.history_accumulation_fund, funds);
    }

    #[test]
    fn prop_every_positive_income_has_a_bracket(cents in 1i64..500_000_000) {
        let config = load_config();
        let taxable = yuan(cents);

        let bracket = find_bracket(&config.year_tax_rates, taxable);
        prop_assert!(bracket.is_some());
        prop_assert!(bracket.unwrap().covers(taxable));
    }
}
