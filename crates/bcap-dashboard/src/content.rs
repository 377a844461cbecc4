#![forbid(unsafe_code)]

//! Localized page text.
//!
//! English is the default and the fallback for every other locale.
//! Long-form panels use the markup understood by
//! [`Text::from_markup`](bcap_widgets::text::Text::from_markup).

use bcap_i18n::{LocaleStrings, StringCatalog};

pub const FALLBACK_LOCALE: &str = "en";

pub mod keys {
    pub const TITLE: &str = "app.title";
    pub const SUBTITLE: &str = "app.subtitle";
    pub const MODEL_LOADED: &str = "model.loaded";
    pub const MODEL_NOT_FOUND: &str = "model.not_found";
    pub const MODEL_NOT_FOUND_HINT: &str = "model.not_found_hint";
    pub const MODEL_LOAD_FAILED: &str = "model.load_failed";
    pub const MODEL_LOAD_FAILED_HINT: &str = "model.load_failed_hint";
    pub const SIDEBAR_HEADER: &str = "sidebar.header";
    pub const SIDEBAR_PROMPT: &str = "sidebar.prompt";
    pub const POROSITY_LABEL: &str = "field.porosity.label";
    pub const POROSITY_HELP: &str = "field.porosity.help";
    pub const DIFFUSIVITY_LABEL: &str = "field.diffusivity.label";
    pub const DIFFUSIVITY_HELP: &str = "field.diffusivity.help";
    pub const OUT_OF_TYPICAL_RANGE: &str = "field.out_of_range";
    pub const PREDICT_BUTTON: &str = "button.predict";
    pub const RESULT_HEADER: &str = "result.header";
    pub const RESULT_CAPACITY: &str = "result.capacity";
    pub const RESULT_INPUTS: &str = "result.inputs";
    pub const RESULT_POROSITY: &str = "result.porosity";
    pub const RESULT_DIFFUSIVITY: &str = "result.diffusivity";
    pub const PREDICT_FAILED: &str = "predict.failed";
    pub const EXAMPLE_HINT: &str = "example.hint";
    pub const EXAMPLE_HEADER: &str = "example.header";
    pub const EXAMPLE_COL_CASE: &str = "example.col.case";
    pub const EXAMPLE_COL_RANGE: &str = "example.col.range";
    pub const EXAMPLE_ROW_MIN: &str = "example.row.min";
    pub const EXAMPLE_ROW_AVG: &str = "example.row.avg";
    pub const EXAMPLE_ROW_MAX: &str = "example.row.max";
    pub const INFO_HEADER: &str = "info.header";
    pub const INFO_CATHODE: &str = "info.cathode";
    pub const INFO_BINDER: &str = "info.binder";
    pub const INFO_CONDUCTIVE: &str = "info.conductive";
    pub const INFO_SLURRY: &str = "info.slurry";
    pub const USAGE_TITLE: &str = "usage.title";
    pub const USAGE_BODY: &str = "usage.body";
    pub const MODEL_INFO_TITLE: &str = "model_info.title";
    pub const MODEL_INFO_ALGORITHM: &str = "model_info.algorithm";
    pub const MODEL_INFO_IMPORTANCE: &str = "model_info.importance";
    pub const MODEL_INFO_IMPORTANCE_ITEM: &str = "model_info.importance_item";
    pub const MODEL_INFO_IMPORTANCE_TOP: &str = "model_info.importance_top";
    pub const MODEL_INFO_TRAINING: &str = "model_info.training";
    pub const FOOTER: &str = "footer";
    pub const KEY_HINTS: &str = "keys.hints";
}

const EN: &[(&str, &str)] = &[
    (keys::TITLE, "Battery Capacity Predictor"),
    (keys::SUBTITLE, "**Battery capacity prediction powered by a machine learning model**"),
    (keys::MODEL_LOADED, "Model loaded successfully!"),
    (keys::MODEL_NOT_FOUND, "{path} could not be found!"),
    (keys::MODEL_NOT_FOUND_HINT, "Train and save the model first."),
    (keys::MODEL_LOAD_FAILED, "An error occurred while loading the model: {error}"),
    (keys::MODEL_LOAD_FAILED_HINT, "Check that {path} is a valid XGBoost JSON model."),
    (keys::SIDEBAR_HEADER, "Input parameters"),
    (keys::SIDEBAR_PROMPT, "Enter the battery properties:"),
    (keys::POROSITY_LABEL, "Porosity"),
    (keys::POROSITY_HELP, "Porosity of the battery electrode (0.0 ~ 1.0)"),
    (keys::DIFFUSIVITY_LABEL, "Effective diffusivity"),
    (keys::DIFFUSIVITY_HELP, "Effective Li-ion diffusivity inside the battery (cm²/s)"),
    (
        keys::OUT_OF_TYPICAL_RANGE,
        "Outside the typical range {min} ~ {max}; the prediction may be less accurate",
    ),
    (keys::PREDICT_BUTTON, "Predict"),
    (keys::RESULT_HEADER, "Prediction result"),
    (keys::RESULT_CAPACITY, "Expected battery capacity"),
    (keys::RESULT_INPUTS, "Submitted inputs"),
    (keys::RESULT_POROSITY, "Porosity"),
    (keys::RESULT_DIFFUSIVITY, "Diffusivity"),
    (keys::PREDICT_FAILED, "An error occurred during prediction: {error}"),
    (keys::EXAMPLE_HINT, "Enter values in the left sidebar and press Predict."),
    (keys::EXAMPLE_HEADER, "Input examples"),
    (keys::EXAMPLE_COL_CASE, "Case"),
    (keys::EXAMPLE_COL_RANGE, "Expected range"),
    (keys::EXAMPLE_ROW_MIN, "Minimum"),
    (keys::EXAMPLE_ROW_AVG, "Average"),
    (keys::EXAMPLE_ROW_MAX, "Maximum"),
    (keys::INFO_HEADER, "Model description"),
    (keys::INFO_CATHODE, "Cathode active material"),
    (keys::INFO_BINDER, "Binder"),
    (keys::INFO_CONDUCTIVE, "Conductive agent"),
    (keys::INFO_SLURRY, "Slurry composition (active:conductive:binder)"),
    (keys::USAGE_TITLE, "How to use"),
    (
        keys::USAGE_BODY,
        "### How to use
1. Enter **Porosity** and **Effective diffusivity** in the **left sidebar**
2. Press the **Predict** button to predict the battery capacity
3. The result is shown as a percentage (%)

### Typical input ranges
- **Porosity**: 0.313 ~ 0.428
- **Effective diffusivity**: 4.22e-08 ~ 1.75e-07 cm²/s

### Caveats
- Values outside the typical ranges may give less accurate predictions
- The model was trained under specific conditions",
    ),
    (keys::MODEL_INFO_TITLE, "Model information"),
    (
        keys::MODEL_INFO_ALGORITHM,
        "### Algorithm
- **{algorithm}** regressor (gradient boosting)
- Tree-based ensemble of {trees} trees",
    ),
    (keys::MODEL_INFO_IMPORTANCE, "### Feature importance"),
    (keys::MODEL_INFO_IMPORTANCE_ITEM, "- **{feature}**: {percent}%"),
    (keys::MODEL_INFO_IMPORTANCE_TOP, "- **{feature}**: {percent}% (most important)"),
    (
        keys::MODEL_INFO_TRAINING,
        "### Training data
- 215 samples in total
- Training: 172, test: 43
- Missing values: none",
    ),
    (keys::FOOTER, "Battery capacity prediction system | XGBoost ML Model | Built with bcap"),
    (
        keys::KEY_HINTS,
        "Tab focus · ↑↓ step · Enter edit/predict · u usage · i model info · L language · q quit",
    ),
];

const KO: &[(&str, &str)] = &[
    (keys::TITLE, "배터리 용량 예측기"),
    (keys::SUBTITLE, "**인공지능 모델을 사용한 배터리 용량 예측 시스템**"),
    (keys::MODEL_LOADED, "모델이 성공적으로 로드되었습니다!"),
    (keys::MODEL_NOT_FOUND, "{path} 파일을 찾을 수 없습니다!"),
    (keys::MODEL_NOT_FOUND_HINT, "먼저 모델을 훈련하고 저장해주세요."),
    (keys::MODEL_LOAD_FAILED, "모델 로드 중 오류가 발생했습니다: {error}"),
    (keys::MODEL_LOAD_FAILED_HINT, "{path} 파일이 올바른 XGBoost JSON 모델인지 확인해주세요."),
    (keys::SIDEBAR_HEADER, "입력 파라미터"),
    (keys::SIDEBAR_PROMPT, "배터리 특성 값을 입력하세요:"),
    (keys::POROSITY_LABEL, "Porosity (다공성)"),
    (keys::POROSITY_HELP, "배터리 전극의 다공성 (0.0 ~ 1.0)"),
    (keys::DIFFUSIVITY_LABEL, "Effective diffusivity (유효확산도)"),
    (keys::DIFFUSIVITY_HELP, "배터리 내부의 Li이온 유효확산도 (cm²/s)"),
    (
        keys::OUT_OF_TYPICAL_RANGE,
        "일반적인 범위({min} ~ {max})를 벗어나 예측 정확도가 떨어질 수 있습니다",
    ),
    (keys::PREDICT_BUTTON, "예측하기"),
    (keys::RESULT_HEADER, "예측 결과"),
    (keys::RESULT_CAPACITY, "예상 배터리 용량"),
    (keys::RESULT_INPUTS, "입력값 확인"),
    (keys::RESULT_POROSITY, "Porosity"),
    (keys::RESULT_DIFFUSIVITY, "Diffusivity"),
    (keys::PREDICT_FAILED, "예측 중 오류가 발생했습니다: {error}"),
    (keys::EXAMPLE_HINT, "왼쪽 사이드바에서 값을 입력하고 예측하기 버튼을 클릭하세요."),
    (keys::EXAMPLE_HEADER, "입력 예시"),
    (keys::EXAMPLE_COL_CASE, "구분"),
    (keys::EXAMPLE_COL_RANGE, "예상 범위"),
    (keys::EXAMPLE_ROW_MIN, "최소값"),
    (keys::EXAMPLE_ROW_AVG, "평균값"),
    (keys::EXAMPLE_ROW_MAX, "최대값"),
    (keys::INFO_HEADER, "모델 설명"),
    (keys::INFO_CATHODE, "양극 활물질"),
    (keys::INFO_BINDER, "바인더"),
    (keys::INFO_CONDUCTIVE, "도전재"),
    (keys::INFO_SLURRY, "슬러리 조성 (활:도:바)"),
    (keys::USAGE_TITLE, "사용법 안내"),
    (
        keys::USAGE_BODY,
        "### 사용 방법
1. **왼쪽 사이드바**에서 **Porosity**와 **Effective diffusivity** 값을 입력하세요
2. **예측하기** 버튼을 클릭하면 배터리 용량을 예측합니다
3. 결과는 백분율(%)로 표시됩니다

### 입력 범위 가이드
- **Porosity**: 0.313 ~ 0.428 (일반적인 범위)
- **Effective diffusivity**: 4.22e-08 ~ 1.75e-07 cm²/s (일반적인 범위)

### 주의사항
- 입력 범위를 벗어난 값은 예측 정확도가 떨어질 수 있습니다
- 이 모델은 특정 조건에서 훈련된 모델입니다",
    ),
    (keys::MODEL_INFO_TITLE, "모델 정보"),
    (
        keys::MODEL_INFO_ALGORITHM,
        "### 사용된 알고리즘
- **{algorithm}** Regressor (Gradient Boosting)
- 트리 기반 앙상블 모델 ({trees}개 트리)",
    ),
    (keys::MODEL_INFO_IMPORTANCE, "### 특성 중요도"),
    (keys::MODEL_INFO_IMPORTANCE_ITEM, "- **{feature}**: {percent}%"),
    (keys::MODEL_INFO_IMPORTANCE_TOP, "- **{feature}**: {percent}% (더 중요)"),
    (
        keys::MODEL_INFO_TRAINING,
        "### 훈련 데이터
- 총 215개 샘플
- 훈련: 172개, 테스트: 43개
- 결측값: 없음",
    ),
    (keys::FOOTER, "배터리 용량 예측 시스템 | XGBoost ML Model | Built with bcap"),
    (
        keys::KEY_HINTS,
        "Tab 이동 · ↑↓ 조정 · Enter 입력/예측 · u 사용법 · i 모델 정보 · L 언어 · q 종료",
    ),
];

/// Locales offered by the `L` key, in cycling order.
pub const LOCALES: [&str; 2] = ["en", "ko"];

/// Illustrative rows shown before the first prediction: label key,
/// porosity, diffusivity, expected capacity range.
pub const EXAMPLE_ROWS: [(&str, &str, &str, &str); 3] = [
    (keys::EXAMPLE_ROW_MIN, "0.313", "4.22e-08", "91% ~ 95%"),
    (keys::EXAMPLE_ROW_AVG, "0.365", "9.49e-08", "95% ~ 96%"),
    (keys::EXAMPLE_ROW_MAX, "0.428", "1.75e-07", "96% ~ 99%"),
];

/// Electrode composition the model was trained on.
pub const MATERIALS: [(&str, &str); 4] = [
    (keys::INFO_CATHODE, "NCM811"),
    (keys::INFO_BINDER, "PVDF"),
    (keys::INFO_CONDUCTIVE, "Super P-Li"),
    (keys::INFO_SLURRY, "94:3:3"),
];

/// Importance shares quoted when the artifact records no split gains.
pub const DOCUMENTED_IMPORTANCE: [(&str, f64); 2] = [("Porosity", 54.66), ("diffusivity", 45.34)];

pub fn catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();
    catalog.add_locale("en", EN.iter().copied().collect::<LocaleStrings>());
    catalog.add_locale("ko", KO.iter().copied().collect::<LocaleStrings>());
    catalog.set_fallback_chain(vec![FALLBACK_LOCALE.to_string()]);
    catalog
}

/// The catalog seen through one locale.
#[derive(Debug, Clone, Copy)]
pub struct Strings<'a> {
    catalog: &'a StringCatalog,
    locale: &'a str,
}

impl<'a> Strings<'a> {
    pub fn new(catalog: &'a StringCatalog, locale: &'a str) -> Self {
        Self { catalog, locale }
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// The string for `key`, or the key itself when no locale defines it.
    pub fn get(&self, key: &'a str) -> &'a str {
        self.catalog.get(self.locale, key).unwrap_or(key)
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.catalog
            .format(self.locale, key, args)
            .unwrap_or_else(|| key.to_string())
    }
}
