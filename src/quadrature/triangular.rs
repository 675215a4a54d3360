//! Symmetric triangle rules integrating polynomials up to the rule's order
//! exactly.
//!
//! Points are barycentric coordinates on the reference triangle; weights are
//! normalized to the reference triangle's area and sum to 1.

use static_assertions::const_assert_eq;

use crate::quadrature::QuadratureRule;
use crate::quadrature::TriangleRule;

/// Orders the triangular family supports.
pub const TRIANGULAR_ORDERS: [u32; 5] = [1, 4, 8, 10, 12];

const TRI_1: [([f64; 3], f64); 1] = [
    ([0.3333333333333333, 0.3333333333333333, 0.3333333333333333], 1.0),
];

const TRI_4: [([f64; 3], f64); 6] = [
    ([0.10810301816807, 0.445948490915965, 0.445948490915965], 0.223381589678011),
    ([0.445948490915965, 0.10810301816807, 0.445948490915965], 0.223381589678011),
    ([0.445948490915965, 0.445948490915965, 0.10810301816807], 0.223381589678011),
    ([0.816847572980459, 0.091576213509771, 0.091576213509771], 0.109951743655322),
    ([0.091576213509771, 0.816847572980459, 0.091576213509771], 0.109951743655322),
    ([0.091576213509771, 0.091576213509771, 0.816847572980459], 0.109951743655322),
];

const TRI_8: [([f64; 3], f64); 16] = [
    ([0.3333333333333333, 0.3333333333333333, 0.3333333333333333], 0.144315607677787),
    ([0.081414823414554, 0.459292588292723, 0.459292588292723], 0.095091634267285),
    ([0.459292588292723, 0.081414823414554, 0.459292588292723], 0.095091634267285),
    ([0.459292588292723, 0.459292588292723, 0.081414823414554], 0.095091634267285),
    ([0.65886138449648, 0.17056930775176, 0.17056930775176], 0.103217370534718),
    ([0.17056930775176, 0.65886138449648, 0.17056930775176], 0.103217370534718),
    ([0.17056930775176, 0.17056930775176, 0.65886138449648], 0.103217370534718),
    ([0.898905543365938, 0.050547228317031, 0.050547228317031], 0.032458497623198),
    ([0.050547228317031, 0.898905543365938, 0.050547228317031], 0.032458497623198),
    ([0.050547228317031, 0.050547228317031, 0.898905543365938], 0.032458497623198),
    ([0.008394777409958, 0.263112829634638, 0.728492392955404], 0.027230314174435),
    ([0.008394777409958, 0.728492392955404, 0.263112829634638], 0.027230314174435),
    ([0.263112829634638, 0.008394777409958, 0.728492392955404], 0.027230314174435),
    ([0.263112829634638, 0.728492392955404, 0.008394777409958], 0.027230314174435),
    ([0.728492392955404, 0.008394777409958, 0.263112829634638], 0.027230314174435),
    ([0.728492392955404, 0.263112829634638, 0.008394777409958], 0.027230314174435),
];

const TRI_10: [([f64; 3], f64); 25] = [
    ([0.3333333333333333, 0.3333333333333333, 0.3333333333333333], 0.090817990382754),
    ([0.028844733232685, 0.485577633383657, 0.485577633383657], 0.036725957756467),
    ([0.485577633383657, 0.028844733232685, 0.485577633383657], 0.036725957756467),
    ([0.485577633383657, 0.485577633383657, 0.028844733232685], 0.036725957756467),
    ([0.781036849029926, 0.109481575485037, 0.109481575485037], 0.045321059435528),
    ([0.109481575485037, 0.781036849029926, 0.109481575485037], 0.045321059435528),
    ([0.109481575485037, 0.109481575485037, 0.781036849029926], 0.045321059435528),
    ([0.14170721941488, 0.307939838764121, 0.550352941820999], 0.07275791684542),
    ([0.14170721941488, 0.550352941820999, 0.307939838764121], 0.07275791684542),
    ([0.307939838764121, 0.14170721941488, 0.550352941820999], 0.07275791684542),
    ([0.307939838764121, 0.550352941820999, 0.14170721941488], 0.07275791684542),
    ([0.550352941820999, 0.14170721941488, 0.307939838764121], 0.07275791684542),
    ([0.550352941820999, 0.307939838764121, 0.14170721941488], 0.07275791684542),
    ([0.025003534762686, 0.246672560639903, 0.728323904597411], 0.028327242531057),
    ([0.025003534762686, 0.728323904597411, 0.246672560639903], 0.028327242531057),
    ([0.246672560639903, 0.025003534762686, 0.728323904597411], 0.028327242531057),
    ([0.246672560639903, 0.728323904597411, 0.025003534762686], 0.028327242531057),
    ([0.728323904597411, 0.025003534762686, 0.246672560639903], 0.028327242531057),
    ([0.728323904597411, 0.246672560639903, 0.025003534762686], 0.028327242531057),
    ([0.009540815400299, 0.0668032510122, 0.9236559335875], 0.009421666963733),
    ([0.009540815400299, 0.9236559335875, 0.0668032510122], 0.009421666963733),
    ([0.0668032510122, 0.009540815400299, 0.9236559335875], 0.009421666963733),
    ([0.0668032510122, 0.9236559335875, 0.009540815400299], 0.009421666963733),
    ([0.9236559335875, 0.009540815400299, 0.0668032510122], 0.009421666963733),
    ([0.9236559335875, 0.0668032510122, 0.009540815400299], 0.009421666963733),
];

const TRI_12: [([f64; 3], f64); 33] = [
    ([0.02356522045239, 0.488217389773805, 0.488217389773805], 0.025731066440455),
    ([0.488217389773805, 0.02356522045239, 0.488217389773805], 0.025731066440455),
    ([0.488217389773805, 0.488217389773805, 0.02356522045239], 0.025731066440455),
    ([0.120551215411079, 0.43972439229446, 0.43972439229446], 0.043692544538038),
    ([0.43972439229446, 0.120551215411079, 0.43972439229446], 0.043692544538038),
    ([0.43972439229446, 0.43972439229446, 0.120551215411079], 0.043692544538038),
    ([0.457579229975768, 0.271210385012116, 0.271210385012116], 0.062858224217885),
    ([0.271210385012116, 0.457579229975768, 0.271210385012116], 0.062858224217885),
    ([0.271210385012116, 0.271210385012116, 0.457579229975768], 0.062858224217885),
    ([0.744847708916828, 0.127576145541586, 0.127576145541586], 0.034796112930709),
    ([0.127576145541586, 0.744847708916828, 0.127576145541586], 0.034796112930709),
    ([0.127576145541586, 0.127576145541586, 0.744847708916828], 0.034796112930709),
    ([0.957365299093579, 0.02131735045321, 0.02131735045321], 0.006166261051559),
    ([0.02131735045321, 0.957365299093579, 0.02131735045321], 0.006166261051559),
    ([0.02131735045321, 0.02131735045321, 0.957365299093579], 0.006166261051559),
    ([0.115343494534698, 0.275713269685514, 0.608943235779788], 0.040371557766381),
    ([0.115343494534698, 0.608943235779788, 0.275713269685514], 0.040371557766381),
    ([0.275713269685514, 0.115343494534698, 0.608943235779788], 0.040371557766381),
    ([0.275713269685514, 0.608943235779788, 0.115343494534698], 0.040371557766381),
    ([0.608943235779788, 0.115343494534698, 0.275713269685514], 0.040371557766381),
    ([0.608943235779788, 0.275713269685514, 0.115343494534698], 0.040371557766381),
    ([0.022838332222257, 0.28132558098994, 0.695836086787803], 0.022356773202303),
    ([0.022838332222257, 0.695836086787803, 0.28132558098994], 0.022356773202303),
    ([0.28132558098994, 0.022838332222257, 0.695836086787803], 0.022356773202303),
    ([0.28132558098994, 0.695836086787803, 0.022838332222257], 0.022356773202303),
    ([0.695836086787803, 0.022838332222257, 0.28132558098994], 0.022356773202303),
    ([0.695836086787803, 0.28132558098994, 0.022838332222257], 0.022356773202303),
    ([0.02573405054833, 0.116251915907597, 0.858014033544073], 0.017316231108659),
    ([0.02573405054833, 0.858014033544073, 0.116251915907597], 0.017316231108659),
    ([0.116251915907597, 0.02573405054833, 0.858014033544073], 0.017316231108659),
    ([0.116251915907597, 0.858014033544073, 0.02573405054833], 0.017316231108659),
    ([0.858014033544073, 0.02573405054833, 0.116251915907597], 0.017316231108659),
    ([0.858014033544073, 0.116251915907597, 0.02573405054833], 0.017316231108659),
];

const_assert_eq!(TRI_1.len(), 1);
const_assert_eq!(TRI_4.len(), 6);
const_assert_eq!(TRI_8.len(), 16);
const_assert_eq!(TRI_10.len(), 25);
const_assert_eq!(TRI_12.len(), 33);

pub(crate) static TRIANGULAR_RULES: [TriangleRule; 5] = [
    TriangleRule::borrowed(QuadratureRule::Triangular, 1, &TRI_1),
    TriangleRule::borrowed(QuadratureRule::Triangular, 4, &TRI_4),
    TriangleRule::borrowed(QuadratureRule::Triangular, 8, &TRI_8),
    TriangleRule::borrowed(QuadratureRule::Triangular, 10, &TRI_10),
    TriangleRule::borrowed(QuadratureRule::Triangular, 12, &TRI_12),
];

/// Rule for `order`, if the family has one.
pub(crate) fn rule(order: u32) -> Option<&'static TriangleRule> {
    TRIANGULAR_RULES.iter().find(|r| r.order() == order)
}
