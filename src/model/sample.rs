//! Built-in sample emails, one per category.

use std::str::FromStr;

/// Which sample to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// A support request that needs action.
    Produtivo,
    /// A courtesy message that needs no action.
    Improdutivo,
}

const PRODUTIVO: &str = "Prezados,

Estou enfrentando dificuldades para acessar o sistema corporativo desde ontem à tarde. Quando tento fazer login, recebo a mensagem de erro \"Credenciais inválidas\", mesmo tendo certeza de que estou usando a senha correta.

Este problema está impactando minha produtividade, pois preciso acessar os relatórios financeiros para a reunião de amanhã.

Poderiam me ajudar a resolver esta questão com urgência?

Aguardo retorno.

Atenciosamente,
João Silva
Departamento Financeiro";

const IMPRODUTIVO: &str = "Olá pessoal,

Espero que todos estejam bem!

Quero parabenizar toda a equipe pelo excelente trabalho realizado no último trimestre. Os resultados superaram nossas expectativas e isso só foi possível graças ao empenho de cada um.

Aproveito para desejar um ótimo final de semana para todos.

Abraços,
Maria Santos
Gerente de Projetos";

impl SampleKind {
    pub const ALL: [SampleKind; 2] = [SampleKind::Produtivo, SampleKind::Improdutivo];

    /// The fixed sample text.
    pub fn text(self) -> &'static str {
        match self {
            Self::Produtivo => PRODUTIVO,
            Self::Improdutivo => IMPRODUTIVO,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Produtivo => "produtivo",
            Self::Improdutivo => "improdutivo",
        }
    }
}

impl FromStr for SampleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "produtivo" | "productive" => Ok(Self::Produtivo),
            "improdutivo" | "unproductive" => Ok(Self::Improdutivo),
            _ => Err(crate::i18n::err_unknown_example().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discriminator() {
        assert_eq!("produtivo".parse(), Ok(SampleKind::Produtivo));
        assert_eq!("IMPRODUTIVO".parse(), Ok(SampleKind::Improdutivo));
        assert_eq!("unproductive".parse(), Ok(SampleKind::Improdutivo));
        assert!("spam".parse::<SampleKind>().is_err());
    }

    #[test]
    fn test_samples_pass_text_validation() {
        let limits = crate::model::input::InputLimits::default();
        for kind in SampleKind::ALL {
            assert!(crate::model::input::validate_text(kind.text(), &limits).is_ok());
            assert_eq!(kind.name().parse(), Ok(kind));
        }
    }
}
