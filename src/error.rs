use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidHand,
    OutOfRange,
    Calculation,
    Generation,
    InvalidSelection,
}

#[derive(Debug)]
pub enum QuizError {
    /// 手牌データの不備 (枚数, 牌の値, 和了形でない等)
    InvalidHand { message: String },
    /// 計算結果が想定範囲外
    OutOfRange {
        label: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
    /// 符・飜・点数の計算中に発生したエラー. 再試行せずに呼び出し元へ伝播させる
    Calculation {
        message: String,
        source: Box<QuizError>,
    },
    /// 問題生成の再試行回数の上限に到達
    Generation {
        message: String,
        source: Option<Box<QuizError>>,
    },
    /// 選択肢に含まれない値が選択された
    InvalidSelection { message: String },
}

impl QuizError {
    pub fn invalid_hand(message: impl Into<String>) -> Self {
        QuizError::InvalidHand {
            message: message.into(),
        }
    }

    pub fn calculation(message: impl Into<String>, source: QuizError) -> Self {
        QuizError::Calculation {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::InvalidHand { .. } => ErrorKind::InvalidHand,
            QuizError::OutOfRange { .. } => ErrorKind::OutOfRange,
            QuizError::Calculation { .. } => ErrorKind::Calculation,
            QuizError::Generation { .. } => ErrorKind::Generation,
            QuizError::InvalidSelection { .. } => ErrorKind::InvalidSelection,
        }
    }

    // 計算エラーはロジックの不具合なので再試行しても意味がない
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Calculation
    }
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InvalidHand { message } => write!(f, "invalid hand: {}", message),
            QuizError::OutOfRange {
                label,
                value,
                min,
                max,
            } => write!(f, "{} out of range: {} (range: {}..={})", label, value, min, max),
            QuizError::Calculation { message, source } => {
                write!(f, "calculation error: {} ({})", message, source)
            }
            QuizError::Generation { message, source } => match source {
                Some(e) => write!(f, "generation error: {} ({})", message, e),
                None => write!(f, "generation error: {}", message),
            },
            QuizError::InvalidSelection { message } => write!(f, "invalid selection: {}", message),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Calculation { source, .. } => Some(source.as_ref()),
            QuizError::Generation {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type QuizResult<T> = Result<T, QuizError>;

#[test]
fn test_error_source() {
    use std::error::Error;

    let e = QuizError::calculation("fu", QuizError::invalid_hand("13 tiles"));
    assert_eq!(e.kind(), ErrorKind::Calculation);
    assert!(e.is_fatal());
    let src = e.source().unwrap();
    assert_eq!(src.to_string(), "invalid hand: 13 tiles");

    let g = QuizError::Generation {
        message: "retry".to_string(),
        source: None,
    };
    assert!(!g.is_fatal());
    assert!(g.source().is_none());
}
